//! Astral-style CLI output formatting.
//!
//! Human-readable output goes to stdout with colored symbols. In JSON mode
//! each command prints exactly one JSON document instead.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Human output is suppressed in JSON mode and in quiet mode.
fn human_output_suppressed(config: OutputConfig) -> bool {
    config.json || config.quiet
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Print the application header with the command name.
pub fn header(command: &str) {
    if human_output_suppressed(read_config()) {
        return;
    }
    println!(
        "{} {} {}",
        "hedgeline".bold(),
        env!("CARGO_PKG_VERSION").dimmed(),
        command.cyan()
    );
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if human_output_suppressed(read_config()) {
        return;
    }
    println!("  {:<18} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    if human_output_suppressed(read_config()) {
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    if read_config().json {
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if read_config().json {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

/// Print a section header.
pub fn section(title: &str) {
    if human_output_suppressed(read_config()) {
        return;
    }
    println!();
    println!("{}", title.bold());
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    if human_output_suppressed(read_config()) {
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Print a note.
pub fn note(message: &str) {
    if human_output_suppressed(read_config()) {
        return;
    }
    println!("  {}", message.dimmed());
}

/// Emit a JSON document.
pub fn json_output(value: &serde_json::Value) {
    println!("{value}");
}

/// Format an amount green when positive and red when negative.
#[must_use]
pub fn signed(value: Decimal) -> String {
    let text = value.normalize().to_string();
    if read_config().json {
        return text;
    }
    if value > Decimal::ZERO {
        format!("{}", text.green())
    } else if value < Decimal::ZERO {
        format!("{}", text.red())
    } else {
        text
    }
}
