//! asset-hierarchy - print the tree of child assets below an asset
//!
//! ## Example Usage
//!
//! ```bash
//! # Direct children only
//! asset-hierarchy --asset-id 066e9d16-b369-42fc-abf4-95ae81778b2c
//!
//! # Every level below the asset
//! asset-hierarchy --asset-id 2c8249d7-9391-4b66-a50d-7b311ea37aec --all-levels
//! ```

use clap::Parser;
use colored::Colorize;
use sitewise_tools::cli::{self, CommonArgs};
use sitewise_tools::hierarchy::{HierarchyLine, HierarchyOptions, HierarchyWalker};
use sitewise_tools::validate::require_uuid;

/// Print the hierarchy of child assets below an asset
#[derive(Parser)]
#[command(name = "asset-hierarchy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Print the hierarchy of child assets below an AWS IoT SiteWise asset", long_about = None)]
struct Cli {
    /// ID of the asset
    #[arg(long, value_name = "UUID")]
    asset_id: String,

    /// Include all levels in the hierarchy
    #[arg(long)]
    all_levels: bool,

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
    require_uuid("Asset ID", &cli.asset_id)?;
    println!("\n{}", "User input successfully validated".green());

    let config = cli.common.load_config()?;
    if cli.common.verbose {
        cli::print_banner("asset-hierarchy", &config);
    }

    let client = cli::client(&config);
    let throttle = config.throttle.pagination.build()?;
    let walker = HierarchyWalker::new(
        &client,
        &throttle,
        HierarchyOptions {
            all_levels: cli.all_levels,
            timeout: config.hierarchy_timeout(),
        },
    );

    let root = walker.root(&cli.asset_id)?;
    println!(
        "\nAsset Name: {}, Asset Id: {}",
        root.asset_name.bold(),
        root.asset_id
    );

    let mut printed = 0usize;
    walker.walk_from(&root, &mut |line: &HierarchyLine| {
        println!("{}", line);
        printed += 1;
    })?;

    if cli.common.verbose {
        println!("\n{} {} child assets", "Listed".dimmed(), printed);
    }
    Ok(())
}
