//! Shared command-line plumbing for the tool binaries

use crate::client::AwsCliClient;
use crate::config::Config;
use crate::error::Result;
use clap::Args;
use colored::Colorize;
use std::fmt::Display;
use std::path::PathBuf;
use std::process;

/// Options accepted by every tool
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// AWS named profile to use
    #[arg(long)]
    pub profile: Option<String>,

    /// AWS region to use
    #[arg(long)]
    pub region: Option<String>,
}

impl CommonArgs {
    /// Load the configuration and apply command-line overrides
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if self.profile.is_some() {
            config.profile = self.profile.clone();
        }
        if self.region.is_some() {
            config.region = self.region.clone();
        }
        Ok(config)
    }
}

/// Initialise `env_logger`; `RUST_LOG` overrides the default level
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Client for the configured `aws` executable, profile and region
pub fn client(config: &Config) -> AwsCliClient {
    AwsCliClient::new(config.aws_command.clone())
        .with_profile(config.profile.clone())
        .with_region(config.region.clone())
}

/// Print the tool banner and effective settings
pub fn print_banner(tool: &str, config: &Config) {
    println!(
        "{} v{}",
        tool.cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "Export dir: {}",
        config.export_dir.display().to_string().dimmed()
    );
    if let Some(ref profile) = config.profile {
        println!("Profile: {}", profile.dimmed());
    }
    if let Some(ref region) = config.region {
        println!("Region: {}", region.dimmed());
    }
}

/// Report a fatal error and exit with status 1
pub fn fail(err: impl Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);
    process::exit(1);
}
