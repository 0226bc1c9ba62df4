mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use asistencia_lib::SyncConfig;

#[derive(Parser)]
#[command(name = "asistencia")]
#[command(about = "Sync chamber attendance data into the attendance API")]
struct Cli {
    /// Base URL of the destination API (overrides ASISTENCIA_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full sync pipeline for the current month
    Sync(commands::sync::SyncArgs),
    /// Run the full sync pipeline for one year
    SyncYear(commands::sync_year::SyncYearArgs),
    /// Scrape only: write the temp artifacts and leave them in place
    Scrape(commands::scrape::ScrapeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("asistencia_lib=info".parse().unwrap())
                .add_directive("asistencia_api=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.api_url.as_deref());

    match &cli.command {
        Commands::Sync(args) => commands::sync::run(args, &config).await?,
        Commands::SyncYear(args) => commands::sync_year::run(args, &config).await?,
        Commands::Scrape(args) => commands::scrape::run(args, &config).await?,
    }

    Ok(())
}

/// Flag beats environment beats the built-in default.
fn resolve_config(api_url_flag: Option<&str>) -> SyncConfig {
    let mut config = SyncConfig::default();
    if let Some(url) = api_url_flag
        .map(str::to_string)
        .or_else(|| std::env::var("ASISTENCIA_API_URL").ok())
    {
        config.api_base_url = url;
    }
    config
}
