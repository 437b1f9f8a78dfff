// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe Mesh CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use polyframe_mesh::cli::{Reporter, Runner};
use polyframe_mesh::{io, MeshConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polyframe-mesh")]
#[command(about = "Polyframe Mesh - triangulate planar areas with openings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./mesh.toml plus environment overrides)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Stl,
}

#[derive(Subcommand)]
enum Commands {
    /// Mesh every area of a JSON input document
    Mesh {
        /// Input JSON file
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,
    },

    /// Mesh without writing output and report per-area results
    Check {
        /// Input JSON file(s)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Print internal diagonals as global segments
    Diagonals {
        /// Input JSON file
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => MeshConfig::from_file(path)?,
        None => MeshConfig::load()?,
    };
    let runner = Runner::new(config);

    match &cli.command {
        Commands::Mesh {
            input,
            output,
            format,
        } => mesh_command(&runner, input, output, *format, cli.verbose),
        Commands::Check { inputs } => check_command(&runner, inputs),
        Commands::Diagonals { input } => diagonals_command(&runner, input),
        Commands::Version => {
            println!("Polyframe Mesh v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "polyframe_mesh=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Input file not found: {}", path.display());
    }
    Ok(())
}

fn mesh_command(
    runner: &Runner,
    input: &Path,
    output: &Path,
    format: Format,
    verbose: bool,
) -> Result<()> {
    ensure_exists(input)?;

    let run = runner.run_file(input)?;
    if verbose {
        for area in &run.areas {
            Reporter::report_area(area);
        }
        Reporter::report_summary(&run);
    }

    for area in run.areas.iter().filter(|a| a.result.is_err()) {
        if let Err(e) = &area.result {
            Reporter::report_warning(&format!("{} skipped: {}", area.label, e));
        }
    }

    match format {
        Format::Json => io::export_json(&run.outputs()?, output)?,
        Format::Stl => {
            let areas: Vec<_> = run.meshed().map(|(_, area)| area.clone()).collect();
            io::export_stl(&areas, output)?;
        }
    }

    Reporter::success(&format!(
        "Meshed {} of {} area(s) -> {}",
        run.succeeded(),
        run.areas.len(),
        output.display()
    ));

    if run.failed() > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn check_command(runner: &Runner, inputs: &[PathBuf]) -> Result<()> {
    let mut failed = 0;

    for input in inputs {
        ensure_exists(input)?;
        Reporter::report_info(&format!("Checking {}", input.display()));

        let run = runner.run_file(input)?;
        for area in &run.areas {
            Reporter::report_area(area);
        }
        Reporter::report_summary(&run);
        failed += run.failed();
    }

    if failed > 0 {
        Reporter::report_error(&format!("{} area(s) failed to mesh", failed));
        std::process::exit(1);
    }
    Ok(())
}

fn diagonals_command(runner: &Runner, input: &Path) -> Result<()> {
    ensure_exists(input)?;

    let run = runner.run_file(input)?;
    let mut segments = serde_json::Map::new();
    for (label, area) in run.meshed() {
        let diagonals = area
            .internal_diagonals_as_global_coords()
            .with_context(|| format!("Failed to read diagonals of {}", label))?;
        segments.insert(label.to_string(), serde_json::to_value(diagonals)?);
    }

    println!("{}", serde_json::to_string_pretty(&segments)?);

    if run.failed() > 0 {
        std::process::exit(1);
    }
    Ok(())
}
