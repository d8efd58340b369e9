use crate::validator::compat;
use crate::{Context, Result};
use colored::Colorize;
use std::io::Read;

/// Run the standalone compatibility check over a file, or stdin for `-`
pub fn run(target: &str) -> Result<i32> {
    let (content, source) = if target == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        (buffer, "stdin".to_string())
    } else {
        let content = std::fs::read_to_string(target)
            .with_context(|| format!("File not found: {}", target))?;
        (content, target.to_string())
    };

    println!(
        "{}",
        format!("Checking tracker compatibility: {}", source).cyan()
    );

    let diag = compat::scan(&content);

    if !diag.errors.is_empty() {
        println!("\nErrors (fix before syncing):");
        for error in &diag.errors {
            println!("  {} {}", "✗".red(), error);
        }
    }

    if !diag.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &diag.warnings {
            println!("  {} {}", "⚠".yellow(), warning);
        }
    }

    println!();
    if diag.is_valid() {
        let suffix = if diag.has_warnings() {
            " (with warnings)"
        } else {
            ""
        };
        println!(
            "{}",
            format!("✓ Content is tracker-compatible{}", suffix).green()
        );
        Ok(0)
    } else {
        println!(
            "{}",
            format!("✗ Found {} error(s)", diag.errors.len()).red()
        );
        Ok(1)
    }
}
