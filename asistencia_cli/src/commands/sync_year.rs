//! The `sync-year` subcommand: full pipeline run over one year.

use anyhow::Result;
use clap::Args;
use asistencia_lib::{validation, SyncConfig, SyncPipeline};

use crate::output::print_report;

#[derive(Args)]
pub struct SyncYearArgs {
    /// Year to sync (2000-2100)
    pub year: i32,

    /// Print the report as JSON only, without the human summary
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: &SyncYearArgs, config: &SyncConfig) -> Result<()> {
    let year = validation::validate_year(args.year)?;

    println!("Starting yearly sync for {}...", year);
    let pipeline = SyncPipeline::new(config.clone())?;
    let report = pipeline.run_yearly(year).await?;
    print_report(&report, args.json)?;
    Ok(())
}
