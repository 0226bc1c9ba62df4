//! Party types exchanged with the parties endpoints.

use serde::{Deserialize, Serialize};

/// A party row as returned by `GET /api/parties`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// Database identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Normalized unique key derived from the display name.
    pub slug: String,

    /// Short form shown in dashboards.
    pub abbreviation: String,
}

/// Payload for `POST /api/parties`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParty {
    pub name: String,
    pub slug: String,
    pub abbreviation: String,
}
