//! model-references - export everything that depends on an asset model
//!
//! ## Example Usage
//!
//! ```bash
//! model-references --asset-model-id ec6d3e7c-9026-4c1c-ac66-e73ba7666c2e
//! model-references --asset-model-id ec6d3e7c-9026-4c1c-ac66-e73ba7666c2e --export-dir reports
//! ```

use clap::Parser;
use colored::Colorize;
use sitewise_tools::cli::{self, CommonArgs};
use sitewise_tools::export::{unix_timestamp, CsvExporter};
use sitewise_tools::references::{ReferenceKind, ReferenceTracer, TraceOptions};
use sitewise_tools::validate::require_uuid;
use std::path::PathBuf;

/// Export assets, hierarchy definitions and metric properties referencing an asset model
#[derive(Parser)]
#[command(name = "model-references")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Export everything referencing an AWS IoT SiteWise asset model", long_about = None)]
struct Cli {
    /// ID of the asset model
    #[arg(long, value_name = "UUID")]
    asset_model_id: String,

    /// Directory for the exported CSV file
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.common.verbose);

    if let Err(e) = run(cli) {
        cli::fail(e);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    require_uuid("Asset Model ID", &cli.asset_model_id)?;
    println!("\n{}", "User input successfully validated".green());

    let mut config = cli.common.load_config()?;
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir;
    }
    if cli.common.verbose {
        cli::print_banner("model-references", &config);
    }

    let client = cli::client(&config);
    let options = TraceOptions {
        pagination: config.throttle.pagination.build()?,
        parent_map: config.throttle.parent_map.build()?,
        timeout: config.references_timeout(),
    };
    let tracer = ReferenceTracer::new(&client, options)
        .with_progress(|model| println!("\tChecking references at model: {}..", model));

    println!("\nBuilding a map of all hierarchy references for all models..");
    let parent_map = tracer.build_parent_map()?;

    println!("\nFinding references..");
    let report = tracer.trace_with(&parent_map, &cli.asset_model_id)?;

    if report.is_empty() {
        println!("\n{}", "No references found!".yellow());
        return Ok(());
    }

    println!(
        "\n{} {}",
        "References for model:".bold(),
        report.root_model_name.bright_green()
    );
    println!(
        "  {} {}",
        "Assets:".bold(),
        report.rows_of(ReferenceKind::Asset).count()
    );
    println!(
        "  {} {}",
        "Hierarchy definitions:".bold(),
        report.rows_of(ReferenceKind::HierarchyDefinition).count()
    );
    println!(
        "  {} {}",
        "Dependent properties:".bold(),
        report.rows_of(ReferenceKind::Property).count()
    );
    println!("  {} {}", "Deepest level:".bold(), report.max_level());

    let exporter = CsvExporter::new(&config.export_dir);
    let path = exporter.references_path(&report.root_model_name, unix_timestamp());
    exporter.write(&path, &report.rows)?;
    println!(
        "\n{} Exported references to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}
