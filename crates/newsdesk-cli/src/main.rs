mod commands;

use clap::{Parser, Subcommand};
use newsdesk_core::Category;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newsdesk")]
#[command(about = "Fetch, normalize and classify topical news")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a single category
    Category {
        /// One of politics, tech, security, sysadmin, finance, gov, ai, intel
        name: Category,
    },
    /// Fetch every category in order, pausing between them
    All {
        /// Also report which sources failed
        #[arg(long)]
        with_errors: bool,
    },
    /// Fetch news for a location
    Local {
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        state: String,
    },
    /// Validate configuration and print a summary
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = newsdesk_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Category { name } => commands::run_category(&config, name).await,
        Commands::All { with_errors } => commands::run_all(&config, with_errors).await,
        Commands::Local { city, state } => commands::run_local(&config, &city, &state).await,
        Commands::CheckConfig => commands::run_check_config(&config),
    }
}
