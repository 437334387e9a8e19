//! search-models - export asset models matching a set of conditions
//!
//! ## Example Usage
//!
//! ```bash
//! search-models
//! search-models --no-properties
//! search-models --no-assets --no-hierarchy-definitions
//! search-models --no-properties --no-assets --no-hierarchy-definitions --no-hierarchy-references
//! ```

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sitewise_tools::cli::{self, CommonArgs};
use sitewise_tools::export::{unix_timestamp, CsvExporter};
use sitewise_tools::search::{progress_percent, ModelFilter, ModelRow, ModelSearch, SearchOptions};
use std::path::PathBuf;
use std::time::Instant;

/// Search asset models by structure and usage
#[derive(Parser)]
#[command(name = "search-models")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Export AWS IoT SiteWise asset models matching every given condition", long_about = None)]
struct Cli {
    /// Filter models not referenced by other asset models
    #[arg(long)]
    no_hierarchy_references: bool,

    /// Filter models without any hierarchy definitions
    #[arg(long)]
    no_hierarchy_definitions: bool,

    /// Filter models with no properties
    #[arg(long)]
    no_properties: bool,

    /// Filter models with no corresponding assets
    #[arg(long)]
    no_assets: bool,

    /// Directory for the exported CSV file
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

impl Cli {
    fn filter(&self) -> ModelFilter {
        ModelFilter {
            no_hierarchy_references: self.no_hierarchy_references,
            no_hierarchy_definitions: self.no_hierarchy_definitions,
            no_properties: self.no_properties,
            no_assets: self.no_assets,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.common.verbose);

    if let Err(e) = run(cli) {
        cli::fail(e);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let start = Instant::now();
    let filter = cli.filter();

    let mut config = cli.common.load_config()?;
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir;
    }
    if cli.common.verbose {
        cli::print_banner("search-models", &config);
        println!("Active filters: {}", filter.active_filter_count());
    }

    let client = cli::client(&config);
    let search = ModelSearch::new(
        &client,
        SearchOptions {
            pagination: config.throttle.pagination.build()?,
            per_model: config.throttle.search.build()?,
        },
    );

    println!("\n{}", "Analyzing models..".cyan().bold());
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("█▓▒░ "),
    );

    let models = search.run(&filter, &mut |done: usize, total: usize| {
        if let Some(line) = report_progress(&pb, done, total) {
            println!("{}", line);
        }
    })?;
    pb.finish_and_clear();

    if models.is_empty() {
        println!(
            "\n{}",
            "No models with provided conditions are found!".yellow()
        );
    } else {
        println!(
            "\n{} {}",
            "Models with provided conditions:".bold(),
            models.len()
        );
        for model in &models {
            println!(
                "\tModel Name: {}, Model Id: {}",
                model.name.bright_green(),
                model.id
            );
        }

        let rows: Vec<ModelRow> = models.iter().map(ModelRow::from).collect();
        let exporter = CsvExporter::new(&config.export_dir);
        let path = exporter.models_path(unix_timestamp());
        exporter.write(&path, &rows)?;
        println!(
            "\n{} Exported models to {}",
            "✓".green().bold(),
            path.display()
        );
    }

    println!(
        "\n** Total execution time: {} seconds **",
        start.elapsed().as_secs_f64().round()
    );
    Ok(())
}

/// Update the bar; when it cannot draw (no terminal) return a plain line to print instead
fn report_progress(pb: &ProgressBar, done: usize, total: usize) -> Option<String> {
    let message = format!("Progress: {}%", progress_percent(done, total));
    pb.set_length(total as u64);
    pb.set_position(done as u64);
    if pb.is_hidden() {
        Some(message)
    } else {
        pb.set_message(message);
        None
    }
}
