//! The `scrape` subcommand: extraction only, artifacts left in place.

use anyhow::Result;
use chrono::Local;
use clap::Args;
use asistencia_lib::extract::{current_month_range, DateRange};
use asistencia_lib::validation::{validate_date_dmy, validate_date_range};
use asistencia_lib::{artifacts, ChamberScraper, SyncConfig};

#[derive(Args)]
pub struct ScrapeArgs {
    /// Range start in DD/MM/YYYY (defaults to the first day of this month)
    #[arg(long)]
    pub from: Option<String>,

    /// Range end in DD/MM/YYYY (defaults to the last day of this month)
    #[arg(long)]
    pub to: Option<String>,
}

pub async fn run(args: &ScrapeArgs, config: &SyncConfig) -> Result<()> {
    let window = resolve_window(args)?;

    let scraper = ChamberScraper::new(config)?;
    let result = scraper.scrape(&window).await?;
    artifacts::write_artifacts(config, &result)?;

    println!("\nArtifacts left in {}", config.temp_dir.display());
    Ok(())
}

fn resolve_window(args: &ScrapeArgs) -> Result<DateRange> {
    let default = current_month_range(Local::now().date_naive());
    let from = match &args.from {
        Some(s) => validate_date_dmy(s)?,
        None => default.from,
    };
    let to = match &args.to {
        Some(s) => validate_date_dmy(s)?,
        None => default.to,
    };
    Ok(validate_date_range(from, to)?)
}
