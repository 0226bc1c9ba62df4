//! Politician and attendance sync: create-or-find, then upsert figures.

use std::path::Path;

use asistencia_api::types::{
    CreatePolitician, MonthlyAttendance, Politician, YearlyAttendance,
};
use asistencia_api::{Client, Error as ApiError};

use super::{
    print_summary, progress_mark, ItemError, ItemOutcome, Period, StageOutcome,
    SNAPSHOT_RETRY_ATTEMPTS, SNAPSHOT_RETRY_DELAY,
};
use crate::artifacts;
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::pace::{retry_request, with_delay};
use crate::scrape::PoliticianAttendance;

/// Reads the politicians artifact and syncs it for the given period.
pub async fn create_politicians_from_file(
    client: &Client,
    config: &SyncConfig,
    path: &Path,
    period: Period,
) -> Result<StageOutcome, SyncError> {
    let politicians = artifacts::read_politicians(path)?;
    sync_politicians(client, config, &politicians, period).await
}

/// Resolves each record against the roster, creating missing politicians,
/// then upserts the period's attendance figures.
///
/// The roster is fetched once per invocation; a failure there aborts the
/// stage. A politician that had to be created always gets its attendance
/// write attempted in the same iteration. Every item except the last is
/// followed by the configured delay.
pub async fn sync_politicians(
    client: &Client,
    config: &SyncConfig,
    records: &[PoliticianAttendance],
    period: Period,
) -> Result<StageOutcome, SyncError> {
    println!("Processing {} politicians...", records.len());

    let roster = retry_request(SNAPSHOT_RETRY_ATTEMPTS, SNAPSHOT_RETRY_DELAY, || {
        client.get_politicians()
    })
    .await?;

    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let outcome = match sync_one(client, config, &roster.data, record, period).await {
            Ok(created) => {
                if created {
                    ItemOutcome::Created
                } else {
                    ItemOutcome::Existing
                }
            }
            Err(e) => ItemOutcome::Failed(ItemError {
                identifier: record.name.clone(),
                error: e.to_string(),
            }),
        };
        progress_mark(&outcome);
        items.push(outcome);

        if index + 1 < records.len() {
            with_delay(config.politician_create_delay).await;
        }
    }

    let outcome = StageOutcome::from_items(items);
    print_summary(&outcome, "politicians");
    Ok(outcome)
}

/// Returns whether the politician had to be created.
async fn sync_one(
    client: &Client,
    config: &SyncConfig,
    roster: &[Politician],
    record: &PoliticianAttendance,
    period: Period,
) -> Result<bool, ApiError> {
    let (politician_id, created) = match roster.iter().find(|p| p.name == record.name) {
        Some(found) => (found.id, false),
        None => {
            let politician = client
                .create_politician(&CreatePolitician {
                    name: record.name.clone(),
                    party_slug: record.party_slug.clone(),
                })
                .await?;
            with_delay(config.politician_create_delay).await;
            (politician.id, true)
        }
    };

    let result = match period {
        Period::Monthly { year, month } => {
            client
                .upsert_monthly_attendance(&MonthlyAttendance {
                    politician_id,
                    year,
                    month,
                    attendance_count: record.attended,
                    absent_count: record.absent,
                    justified_absent_count: record.justified_absent,
                    unjustified_absent_count: record.unjustified_absent,
                    attendance_average: record.percentage,
                })
                .await
        }
        Period::Yearly { year } => {
            client
                .upsert_yearly_attendance(&YearlyAttendance {
                    politician_id,
                    year,
                    attendance_count: record.attended,
                    absent_count: record.absent,
                    justified_absent_count: record.justified_absent,
                    unjustified_absent_count: record.unjustified_absent,
                    attendance_average: record.percentage,
                })
                .await
        }
    };

    match result {
        Ok(()) => Ok(created),
        // Soft failure: the upsert answered with a non-success status.
        // The item still counts as processed.
        Err(ApiError::HttpStatus { status, body }) => {
            tracing::warn!(
                "attendance upsert for {} returned {}: {}",
                record.name,
                status,
                body
            );
            Ok(created)
        }
        Err(e) => Err(e),
    }
}
