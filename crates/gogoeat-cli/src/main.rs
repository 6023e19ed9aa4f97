mod catalog;
mod filters;
mod output;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::filters::{FilterArgs, LocationArgs};

#[derive(Debug, Parser)]
#[command(name = "gogoeat")]
#[command(about = "Find somewhere to eat nearby")]
struct Cli {
    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search restaurants by keyword, falling back to geocoding when needed
    Search {
        /// Keyword, e.g. a dish or restaurant name
        query: String,
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List restaurants around the current location
    Nearby {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Browse the hand-curated restaurant catalog (works offline)
    Catalog {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Loads `.env` before reading the environment.
    let config = gogoeat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let format = output::Format::from_json_flag(cli.json);
    match cli.command {
        Commands::Search {
            query,
            location,
            filters,
        } => search::run_search(&config, &query, &location, &filters, format).await,
        Commands::Nearby { location, filters } => {
            search::run_nearby(&config, &location, &filters, format).await
        }
        Commands::Catalog { filters } => catalog::run_catalog(&config, &filters, format),
    }
}
