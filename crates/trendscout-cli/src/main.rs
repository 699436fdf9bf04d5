mod collect;
mod info;
mod report;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trendscout_core::AppConfig;

pub(crate) const DEFAULT_OUTPUT: &str = "enhanced_trends_data.json";

#[derive(Debug, Parser)]
#[command(name = "trendscout-cli")]
#[command(about = "Collect and rank trending stock-photo keywords")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a collection and write the JSON report
    Collect {
        /// Path of the JSON report
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        out: PathBuf,
        /// Also write a CSV of the ranked keywords next to the JSON report
        #[arg(long)]
        csv: bool,
    },
    /// List the sources the current configuration enables
    Sources,
    /// Print the seasonal fallback keywords
    Seasonal {
        /// Month to use instead of the current one (1-12)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Collect { out, csv }) => {
            collect::run_collect(&load_config()?, &out, csv).await?;
        }
        Some(Commands::Sources) => info::run_sources(&load_config()?)?,
        Some(Commands::Seasonal { month }) => info::run_seasonal(month),
        None => {
            collect::run_collect(&load_config()?, Path::new(DEFAULT_OUTPUT), false).await?;
        }
    }

    Ok(())
}

/// Loads `.env` and the environment, then installs the log subscriber.
///
/// Only commands that touch the network call this, so `--help` and
/// `seasonal` work even when the environment holds invalid values.
fn load_config() -> anyhow::Result<AppConfig> {
    let config = trendscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(config)
}
