// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the gsais CLI.
//!
//! Pretty terminal output that respects your color scheme. OneDark for dark
//! terminals, One Light for light ones. The detection tries `GSAIS_THEME` first
//! (for explicit control), then `COLORFGBG` (set by some terminals), then
//! defaults to dark.
//!
//! Box drawing, verdict badges and timing colors for the run summary. Respects
//! `NO_COLOR` and non-TTY detection for pipelines.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use gsais::build::{BuildReport, InspectReport};
use gsais::types::default_memory_ceiling;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("GSAIS_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; background colors 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// ONEDARK / ONE LIGHT COLOR PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
}

pub use colors::*;

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            if !use_colors() {
                return String::new();
            }
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Left-pad a styled string to a fixed visible width
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = GRAY();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        reset(),
        content,
        " ".repeat(pad),
        border,
        reset()
    );
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = GRAY();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        reset(),
        label_part,
        border,
        "─".repeat(remaining),
        reset()
    );
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let border = GRAY();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}├{}{}{}{}┤{}",
        border,
        reset(),
        label_part,
        border,
        "─".repeat(remaining),
        reset()
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", GRAY(), "─".repeat(BOX_WIDTH), reset());
}

/// Print a key/value line inside a section
pub fn field(key: &str, value: &str) {
    row(&format!(" {} {}", pad_right(&themed(GRAY, &[], key), 22), value));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB * KB {
        format!("{:.2} GB", b / (KB * KB * KB))
    } else if b >= KB * KB {
        format!("{:.2} MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.2} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Pass/fail badge for one validation check
pub fn verdict(label: &str, ok: bool) -> String {
    if ok {
        themed(GREEN, &[BOLD], &format!("✓ {}", label))
    } else {
        themed(RED, &[BOLD], &format!("✗ {}", label))
    }
}

/// Color-coded timing value in ms (green=fast, yellow=medium, red=slow)
pub fn timing_ms(elapsed: Duration) -> String {
    let value = elapsed.as_secs_f64() * 1000.0;
    let text = format!("{:>10.3} ms", value);
    if value < 100.0 {
        themed(GREEN, &[], &text)
    } else if value < 1000.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(RED, &[], &text)
    }
}

/// Truncate a path to max_len, adding ... prefix if needed
pub fn truncate_path(path: &Path, max_len: usize) -> String {
    let path = path.display().to_string();
    let count = path.chars().count();
    if count <= max_len {
        path
    } else {
        let tail: String = path.chars().skip(count - max_len + 3).collect();
        format!("...{}", tail)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

/// Run header: ceiling, chunk capacity, K, N, chunk count, offset width.
pub fn print_run_header(report: &BuildReport) {
    section_top(if report.extract { "EXTRACT" } else { "BUILD" });
    field("input", &truncate_path(&report.input, 48));
    let ceiling = if report.ceiling == default_memory_ceiling() {
        "unlimited".to_string()
    } else {
        format_size(report.ceiling)
    };
    field("memory ceiling", &ceiling);
    field("max(chunk)", &format!("{} symbols", report.capacity));
    field("K (documents)", &report.documents.to_string());
    field("N (symbols + 1)", &report.symbols.to_string());
    field("chunks", &report.chunk_count().to_string());
    field("offset width", &format!("{} bytes", report.index_bytes));
}

/// Per-chunk table, shown at verbosity 1 and up.
pub fn print_chunk_table(report: &BuildReport) {
    section_mid("CHUNKS");
    row(&themed(
        GRAY,
        &[BOLD],
        &format!(
            " {:>6} {:>10} {:>14} {:>6} {:>16}",
            "chunk", "strings", "length", "depth", "time"
        ),
    ));
    for chunk in &report.chunks {
        let depth = chunk
            .depth
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        row(&format!(
            " {:>6} {:>10} {:>14} {:>6} {}",
            chunk.index,
            chunk.documents,
            chunk.len,
            depth,
            pad_left(&timing_ms(chunk.elapsed), 16)
        ));
    }
}

/// Validation verdicts of every validated chunk.
pub fn print_validation(report: &BuildReport) {
    let validated: Vec<_> = report
        .chunks
        .iter()
        .filter_map(|c| c.validation.as_ref().map(|v| (c, v)))
        .collect();
    if validated.is_empty() {
        return;
    }
    section_mid("VALIDATION");
    for (chunk, validation) in validated {
        let badges: Vec<String> = validation
            .verdicts()
            .into_iter()
            .map(|(label, ok)| verdict(label, ok))
            .collect();
        row(&format!(" {:>6}  {}", chunk.index, badges.join("  ")));
        if let Some(lcp) = validation.lcp.as_ref().filter(|l| !l.is_ok()) {
            for mismatch in &lcp.mismatches {
                row(&themed(RED, &[], &format!("         {}", mismatch)));
            }
            if lcp.mismatch_count > lcp.mismatches.len() {
                row(&format!(
                    "         ... and {} more",
                    lcp.mismatch_count - lcp.mismatches.len()
                ));
            }
        }
        if let Some(depth) = chunk.depth {
            row(&themed(GRAY, &[], &format!("         depth = {}", depth)));
        }
    }
}

/// Artifacts and total time.
pub fn print_summary(report: &BuildReport) {
    section_mid("OUTPUT");
    for path in &report.artifacts {
        let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        row(&format!(
            " {} {}",
            pad_right(&truncate_path(path, 52), 54),
            themed(BLUE, &[], &format_size(size))
        ));
    }
    if report.artifacts.is_empty() {
        row(&themed(GRAY, &[], " (no artifacts requested)"));
    }
    if !report.extract {
        field("peak chunk footprint", &format_size(report.peak_footprint()));
    }
    field("total", &timing_ms(report.elapsed));
    section_bot();
}

/// Per-chunk sizes and artifact totals of a finished run.
pub fn print_inspect(report: &InspectReport) {
    section_top("INSPECT");
    field("base", &truncate_path(&report.base, 48));
    field("chunks", &report.chunk_sizes.len().to_string());
    field("BWT symbols", &report.total().to_string());

    section_mid("CHUNKS");
    for (b, size) in report.chunk_sizes.iter().enumerate() {
        row(&format!(" {:>6} {:>14}", b, size));
    }

    if !report.bwt.is_empty() || !report.gap_lcp.is_empty() {
        section_mid("ARTIFACTS");
    }
    for bwt in &report.bwt {
        row(&format!(
            " {} {:>12} bytes {:>14} symbols",
            pad_right(&truncate_path(&bwt.path, 30), 32),
            bwt.bytes,
            bwt.symbols
        ));
    }
    for gap in &report.gap_lcp {
        row(&format!(
            " {} {:>12} entries x {} B",
            pad_right(&truncate_path(&gap.path, 30), 32),
            gap.entries,
            gap.width
        ));
    }
    field("consistent", &verdict("sizes", report.is_consistent()));
    section_bot();
}

/// Accent for the tool name in the first line of output.
pub fn banner(version: &str) {
    println!(
        "{}",
        themed(BRIGHT_CYAN, &[BOLD], &format!("gsais {}", version))
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
