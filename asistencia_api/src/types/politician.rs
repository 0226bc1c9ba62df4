//! Politician types exchanged with the politicians endpoints.

use serde::{Deserialize, Serialize};

/// Database identifier for a politician.
pub type PoliticianID = i64;

/// A politician row as returned by the politicians endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Politician {
    /// Database identifier.
    pub id: PoliticianID,

    /// Display name, unique across the chamber roster.
    pub name: String,

    /// Slug of the party the politician belongs to. Read endpoints may
    /// omit it when joining by numeric party id instead.
    #[serde(default)]
    pub party_slug: Option<String>,
}

/// Payload for `POST /api/politicians`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePolitician {
    pub name: String,
    pub party_slug: String,
}
