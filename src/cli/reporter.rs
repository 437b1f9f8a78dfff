// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::runner::{AreaRun, BatchRun};
use crate::error::MeshResult;
use crate::mesh::MeshArea;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report one meshed (or rejected) area
    pub fn report_area(run: &AreaRun) {
        let outcome = match &run.result {
            Ok(area) => Self::report_meshed(run, area),
            Err(e) => Err(e.clone()),
        };

        if let Err(e) = outcome {
            println!("{} {}", "❌".red(), run.label.cyan());
            println!("  {}", e.to_string().red());
        }
    }

    fn report_meshed(run: &AreaRun, area: &MeshArea) -> MeshResult<()> {
        let triangles = area.triangles()?.len();
        let diagonals = area.internal_diagonals()?.len();
        let expected = area.expected_triangle_count();

        let status = if triangles == expected {
            "✅".green()
        } else {
            "⚠️ ".yellow()
        };

        println!("{} {}", status, run.label.cyan());
        println!(
            "  {} {}  {} {}  {} {}",
            "Vertices:".bright_black(),
            area.vertex_count().to_string().cyan(),
            "Openings:".bright_black(),
            run.openings.to_string().cyan(),
            "Diagonals:".bright_black(),
            diagonals.to_string().cyan()
        );
        Self::print_count("Triangles", triangles, expected);
        println!("  {} {:.3}", "Area:".bright_black(), area.area());
        Ok(())
    }

    /// Report a batch summary
    pub fn report_summary(run: &BatchRun) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{}", "Summary".bold());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Areas:".bright_black(),
            run.areas.len().to_string().cyan()
        );
        println!(
            "  {} {}",
            "Meshed:".bright_black(),
            run.succeeded().to_string().green()
        );
        println!(
            "  {} {}",
            "Failed:".bright_black(),
            if run.failed() > 0 {
                run.failed().to_string().red()
            } else {
                run.failed().to_string().green()
            }
        );
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(run.duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Print a count, red when it misses the expected value
    fn print_count(name: &str, actual: usize, expected: usize) {
        let value = if actual == expected {
            actual.to_string().green()
        } else {
            format!("{} (expected {})", actual, expected).red()
        };
        println!("  {} {}", format!("{}:", name).bright_black(), value);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }
}
