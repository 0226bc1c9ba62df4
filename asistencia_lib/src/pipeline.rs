//! Orchestration of the full sync flow.
//!
//! Four sequential stages: scrape, party creation, politician/attendance
//! creation, temp cleanup. Every stage is awaited before the next starts
//! and the whole run produces one [`SyncReport`]. A stage that fails with
//! an unhandled error aborts the run; per-item failures inside a stage do
//! not.

use std::time::Instant;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use asistencia_api::Client;

use crate::artifacts;
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::extract::{current_month_range, current_year_month, year_range, DateRange};
use crate::scrape::ChamberScraper;
use crate::sync::{parties, politicians, Period, StageOutcome};

/// Counters for the scrape stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeStep {
    pub success: bool,
    pub parties_count: usize,
    pub politicians_count: usize,
    pub attendance_count: usize,
}

/// Per-stage outcomes of one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSteps {
    pub scraping: ScrapeStep,
    pub party_creation: StageOutcome,
    pub politician_creation: StageOutcome,
}

/// Structured report of one pipeline run. Never persisted; it is built
/// while the run progresses and returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub success: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_ms: u64,
    pub steps: SyncSteps,
}

impl SyncReport {
    fn started(start_time: DateTime<Utc>) -> Self {
        Self {
            success: false,
            start_time,
            end_time: None,
            duration_ms: 0,
            steps: SyncSteps::default(),
        }
    }
}

pub struct SyncPipeline {
    config: SyncConfig,
    client: Client,
}

impl SyncPipeline {
    pub fn new(config: SyncConfig) -> Result<Self, SyncError> {
        let client = Client::with_base_url(&config.api_base_url)?;
        Ok(Self { config, client })
    }

    /// Runs the pipeline over the current calendar month.
    pub async fn run_monthly(&self) -> Result<SyncReport, SyncError> {
        let today = Local::now().date_naive();
        let (year, month) = current_year_month(today);
        self.run(current_month_range(today), Period::Monthly { year, month })
            .await
    }

    /// Runs the pipeline over Jan 1 - Dec 31 of `year`.
    pub async fn run_yearly(&self, year: i32) -> Result<SyncReport, SyncError> {
        self.run(year_range(year), Period::Yearly { year }).await
    }

    /// Runs all stages, finalizing the report timestamps on every path.
    pub async fn run(&self, window: DateRange, period: Period) -> Result<SyncReport, SyncError> {
        let clock = Instant::now();
        let mut report = SyncReport::started(Utc::now());

        let outcome = self.run_stages(&mut report, window, period).await;

        report.end_time = Some(Utc::now());
        report.duration_ms = clock.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => {
                report.success = report.steps.scraping.success
                    && report.steps.party_creation.success
                    && report.steps.politician_creation.success;
                println!("\n\nDone. Data synced.");
                Ok(report)
            }
            Err(e) => {
                tracing::error!("sync aborted: {}", e);
                eprintln!("\nError during sync: {}", e);
                // Artifacts are kept in place so a failed run can be inspected.
                eprintln!(
                    "Scrape artifacts kept at {}",
                    self.config.temp_dir.display()
                );
                Err(e)
            }
        }
    }

    async fn run_stages(
        &self,
        report: &mut SyncReport,
        window: DateRange,
        period: Period,
    ) -> Result<(), SyncError> {
        println!("Step 1: Scraping chamber data...\n");
        let scraper = ChamberScraper::new(&self.config)?;
        let result = scraper.scrape(&window).await?;
        let paths = artifacts::write_artifacts(&self.config, &result)?;

        report.steps.scraping = ScrapeStep {
            success: true,
            parties_count: result.parties.len(),
            politicians_count: result.politicians.len(),
            attendance_count: result.attendance.len(),
        };

        println!("\nStep 2: Creating parties...\n");
        report.steps.party_creation =
            parties::create_parties_from_file(&self.client, &self.config, &paths.parties_path)
                .await?;

        println!("\n\nStep 3: Creating politicians and attendance...\n");
        report.steps.politician_creation = politicians::create_politicians_from_file(
            &self.client,
            &self.config,
            &paths.politicians_path,
            period,
        )
        .await?;

        println!("\n\nStep 4: Cleaning up temp files...");
        artifacts::cleanup(&self.config)?;
        println!("Deleted {} directory", self.config.temp_dir.display());

        Ok(())
    }
}
