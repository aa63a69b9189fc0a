use super::read_input;
use anyhow::{bail, Context, Result};
use colored::*;
use dnkit_core::{parse_dn, DnFlags};
use serde::Serialize;
use std::fs;
use tracing::{info, warn};

/// A line that failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidLine {
    /// 1-based line number
    pub line: usize,
    /// Parser error
    pub error: String,
}

/// Outcome of checking a batch of DNs
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    /// Lines that parsed
    pub valid: usize,
    /// Every line that did not
    pub invalid: Vec<InvalidLine>,
}

/// Check every non-blank line of `text`
pub fn check_lines(text: &str, flags: DnFlags) -> CheckSummary {
    let mut summary = CheckSummary::default();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_dn(line, flags) {
            Ok(_) => summary.valid += 1,
            Err(e) => {
                warn!("Line {}: {}", i + 1, e);
                summary.invalid.push(InvalidLine {
                    line: i + 1,
                    error: e.to_string(),
                });
            }
        }
    }

    summary
}

/// Validate DNs line by line from a file or stdin (`-`)
///
/// With `report` the summary is also written there as JSON.
pub fn execute(
    input: &str,
    flags: DnFlags,
    fail_on_invalid: bool,
    report: Option<&str>,
) -> Result<()> {
    info!("Checking DNs in: {}", input);

    let text = read_input(input)?;
    let summary = check_lines(&text, flags);

    println!("\n=== Check Results ===");
    println!("Valid DNs:          {}", summary.valid.to_string().green());
    if summary.invalid.is_empty() {
        println!("Invalid DNs:        0");
        println!("{} All DNs valid", "✓".green());
    } else {
        println!(
            "Invalid DNs:        {}",
            summary.invalid.len().to_string().red()
        );
        for invalid in &summary.invalid {
            println!("{} line {}: {}", "✗".red(), invalid.line, invalid.error);
        }
    }

    if let Some(path) = report {
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(path, json).with_context(|| format!("Failed to write report: {}", path))?;
        info!("Wrote report to {}", path);
    }

    if fail_on_invalid && !summary.invalid.is_empty() {
        bail!("{} invalid DNs in {}", summary.invalid.len(), input);
    }

    Ok(())
}
