//! Sequential, paced sync clients for the destination API.
//!
//! Each stage folds per-item outcomes into a [`StageOutcome`]: items are
//! processed one at a time, a failing item is recorded and never stops
//! the loop, and the stage is successful only when nothing failed.

use std::io::Write;

use serde::{Deserialize, Serialize};

pub mod parties;
pub mod politicians;

/// Cap on itemized errors carried in an outcome. Counts always reflect
/// every failure even when detail beyond the cap is elided.
pub const MAX_ERROR_PREVIEW: usize = 10;

/// Attempts for the once-per-stage snapshot fetches.
pub(crate) const SNAPSHOT_RETRY_ATTEMPTS: u32 = 3;

/// Initial backoff for the snapshot fetches.
pub(crate) const SNAPSHOT_RETRY_DELAY: std::time::Duration =
    std::time::Duration::from_millis(100);

/// Target period for the attendance upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Monthly { year: i32, month: u32 },
    Yearly { year: i32 },
}

/// One failed item within a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemError {
    /// Slug or display name of the failing item.
    pub identifier: String,
    pub error: String,
}

/// What happened to a single item.
#[derive(Debug)]
pub enum ItemOutcome {
    Created,
    /// Already present before the run: an existing party or a found politician.
    Existing,
    Failed(ItemError),
}

/// Aggregated result of one sync stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageOutcome {
    pub success: bool,
    pub created_count: usize,
    pub existing_count: usize,
    pub failure_count: usize,
    /// First [`MAX_ERROR_PREVIEW`] failures; `failure_count` holds the total.
    pub errors: Vec<ItemError>,
}

impl StageOutcome {
    /// Folds per-item outcomes into a stage outcome.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = ItemOutcome>,
    {
        let mut outcome = StageOutcome::default();
        for item in items {
            match item {
                ItemOutcome::Created => outcome.created_count += 1,
                ItemOutcome::Existing => outcome.existing_count += 1,
                ItemOutcome::Failed(err) => {
                    outcome.failure_count += 1;
                    if outcome.errors.len() < MAX_ERROR_PREVIEW {
                        outcome.errors.push(err);
                    }
                }
            }
        }
        outcome.success = outcome.failure_count == 0;
        outcome
    }
}

/// Streams one progress character per processed item.
fn progress_mark(outcome: &ItemOutcome) {
    let mark = match outcome {
        ItemOutcome::Created => '+',
        ItemOutcome::Existing => '.',
        ItemOutcome::Failed(_) => 'X',
    };
    print!("{}", mark);
    let _ = std::io::stdout().flush();
}

/// Prints the stage summary with the capped failure preview.
fn print_summary(outcome: &StageOutcome, item_type: &str) {
    let total = outcome.created_count + outcome.existing_count;
    println!(
        "\n\nProcessed {}: {} created, {} existing",
        total, outcome.created_count, outcome.existing_count
    );

    if outcome.failure_count > 0 {
        eprintln!("Failed to process {} {}:", outcome.failure_count, item_type);
        for err in &outcome.errors {
            eprintln!("  - {}: {}", err.identifier, err.error);
        }
        if outcome.failure_count > outcome.errors.len() {
            eprintln!(
                "  ... and {} more",
                outcome.failure_count - outcome.errors.len()
            );
        }
    }
}
