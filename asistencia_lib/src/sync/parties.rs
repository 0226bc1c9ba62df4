//! Party sync: idempotent create-or-skip against the parties endpoint.

use std::collections::HashSet;
use std::path::Path;

use asistencia_api::types::CreateParty;
use asistencia_api::Client;

use super::{
    print_summary, progress_mark, ItemError, ItemOutcome, StageOutcome, SNAPSHOT_RETRY_ATTEMPTS,
    SNAPSHOT_RETRY_DELAY,
};
use crate::artifacts;
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::pace::{retry_request, with_delay};
use crate::scrape::PartyData;

/// Reads the parties artifact and syncs it.
pub async fn create_parties_from_file(
    client: &Client,
    config: &SyncConfig,
    path: &Path,
) -> Result<StageOutcome, SyncError> {
    let parties = artifacts::read_parties(path)?;
    sync_parties(client, config, &parties).await
}

/// Creates every party the API does not know yet.
///
/// The existing slug set is fetched once per invocation, not per item; a
/// failure to fetch it aborts the stage. Per-item write failures are
/// recorded with the party slug as identifier and the loop continues.
pub async fn sync_parties(
    client: &Client,
    config: &SyncConfig,
    parties: &[PartyData],
) -> Result<StageOutcome, SyncError> {
    println!("Processing {} parties...", parties.len());

    let existing = retry_request(SNAPSHOT_RETRY_ATTEMPTS, SNAPSHOT_RETRY_DELAY, || {
        client.get_parties()
    })
    .await?;
    let existing_slugs: HashSet<&str> = existing.data.iter().map(|p| p.slug.as_str()).collect();

    let mut items = Vec::with_capacity(parties.len());
    for record in parties {
        let outcome = if existing_slugs.contains(record.slug.as_str()) {
            ItemOutcome::Existing
        } else {
            match create_party(client, record).await {
                Ok(()) => {
                    with_delay(config.party_create_delay).await;
                    ItemOutcome::Created
                }
                Err(e) => ItemOutcome::Failed(ItemError {
                    identifier: record.slug.clone(),
                    error: e.to_string(),
                }),
            }
        };
        progress_mark(&outcome);
        items.push(outcome);
    }

    let outcome = StageOutcome::from_items(items);
    print_summary(&outcome, "parties");
    Ok(outcome)
}

async fn create_party(client: &Client, record: &PartyData) -> Result<(), asistencia_api::Error> {
    // The scrape has no separate abbreviation column; the display name
    // doubles as a placeholder until one is curated by hand.
    client
        .create_party(&CreateParty {
            name: record.party.clone(),
            slug: record.slug.clone(),
            abbreviation: record.party.clone(),
        })
        .await?;
    Ok(())
}
