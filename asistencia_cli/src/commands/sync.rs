//! The `sync` subcommand: full pipeline run over the current month.

use anyhow::Result;
use clap::Args;
use asistencia_lib::{SyncConfig, SyncPipeline};

use crate::output::print_report;

#[derive(Args)]
pub struct SyncArgs {
    /// Print the report as JSON only, without the human summary
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: &SyncArgs, config: &SyncConfig) -> Result<()> {
    let pipeline = SyncPipeline::new(config.clone())?;
    let report = pipeline.run_monthly().await?;
    print_report(&report, args.json)?;
    Ok(())
}
