use serde::Deserialize;

/// List envelope returned by the read endpoints.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

/// Response envelope used by the write endpoints: either a `data` payload
/// or an application-level `error` message.
///
/// Replaces ad-hoc `"error" in body` checks with a single decode site.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Data { data: T },
    Error { error: String },
}
