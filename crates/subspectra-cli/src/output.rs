//! Rendering of check results as colored text or JSON

use crate::config::OutputConfig;
use anyhow::Result;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow::anyhow!("Invalid output format: {}", other)),
        }
    }
}

/// Print `value` as JSON, or the text produced by `text`.
pub fn emit<T, F>(value: &T, config: &OutputConfig, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&Styler) -> String,
{
    match config.format {
        OutputFormat::Json => {
            let json = if config.pretty {
                serde_json::to_string_pretty(value)?
            } else {
                serde_json::to_string(value)?
            };
            println!("{}", json);
        }
        OutputFormat::Text => {
            colored::control::set_override(config.colors);
            println!("{}", text(&Styler::new(config.precision)));
        }
    }
    Ok(())
}

/// Number and verdict formatting for text output
pub struct Styler {
    precision: usize,
}

impl Styler {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    pub fn num(&self, value: f64) -> String {
        if value != 0.0 && (value.abs() < 1e-3 || value.abs() >= 1e6) {
            format!("{:.*e}", self.precision.min(3), value)
        } else {
            format!("{:.*}", self.precision, value)
        }
    }

    pub fn list(&self, values: &[f64]) -> String {
        let shown: Vec<String> = values.iter().map(|v| self.num(*v)).collect();
        format!("[{}]", shown.join(", "))
    }

    pub fn verdict(&self, passed: bool) -> ColoredString {
        if passed {
            "PASS".bold().green()
        } else {
            "FAIL".bold().red()
        }
    }

    pub fn heading(&self, title: &str) -> ColoredString {
        title.bold().cyan()
    }

    pub fn field(&self, name: &str, value: impl fmt::Display) -> String {
        format!("  {:<18} {}", format!("{}:", name), value)
    }
}
