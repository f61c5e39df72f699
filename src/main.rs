use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gsais::build::{self, BuildConfig};
use gsais::ErrorKind;

mod cli;
use cli::{display, BuildArgs, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build(args) => load_config(&args).and_then(|config| {
            init_tracing(config.verbosity);
            run_with(&args.file, &config)
        }),
        Commands::Extract {
            file,
            k,
            output,
            verbose,
        } => {
            let config = BuildConfig {
                extract: true,
                documents: k,
                output,
                verbosity: verbose,
                ..Default::default()
            };
            init_tracing(config.verbosity);
            run_with(&file, &config)
        }
        Commands::Inspect { base } => {
            init_tracing(0);
            run_inspect(&base)
        }
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

/// Diagnostics go to stderr: warn by default, one level more per `-v`.
/// `RUST_LOG` takes precedence when set.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gsais={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Exit status per failure category; 1 for failures outside the library.
fn exit_code(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<gsais::Error>().map(gsais::Error::kind) {
        Some(ErrorKind::Configuration) => 2,
        Some(ErrorKind::Data) => 3,
        Some(ErrorKind::Overflow) => 4,
        Some(ErrorKind::Io) => 5,
        Some(ErrorKind::Validation) => 6,
        None => 1,
    }
}

/// The config file (if any) with the flags layered on top.
fn load_config(args: &BuildArgs) -> Result<BuildConfig> {
    let base = match &args.config {
        Some(path) => BuildConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => BuildConfig::default(),
    };
    Ok(args.apply(base))
}

fn run_with(input: &std::path::Path, config: &BuildConfig) -> Result<()> {
    let report = build::run(input, config)
        .with_context(|| format!("processing {}", input.display()))?;

    display::banner(env!("CARGO_PKG_VERSION"));
    display::print_run_header(&report);
    if config.verbosity >= 1 {
        display::print_chunk_table(&report);
    }
    display::print_validation(&report);
    display::print_summary(&report);

    // Failed verdicts are diagnostics; only a strict run turns them into an error
    if config.strict {
        report.require_valid()?;
    }
    Ok(())
}

fn run_inspect(base: &std::path::Path) -> Result<()> {
    let report = build::inspect(base).with_context(|| format!("inspecting {}", base.display()))?;
    display::print_inspect(&report);
    Ok(())
}
