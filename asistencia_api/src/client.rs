//! HTTP client for the attendance REST API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{
    types::{
        CreateParty, CreatePolitician, Envelope, ListResponse, MonthlyAttendance, Party,
        Politician, YearlyAttendance,
    },
    user_agent::get_user_agent,
    Error,
};

/// Default base URL of the locally deployed API service.
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// HTTP client for the attendance REST API.
///
/// Sends JSON requests with a browser-like user agent and a 30-second
/// timeout. Write endpoints answer with an envelope that is either a
/// `data` payload or an `error` message; the latter surfaces as
/// [`Error::Rejected`].
pub struct Client {
    /// Base URL for the API. Defaults to the local service.
    base_api_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Creates a new client pointing at the default API service.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for staging
    /// deployments and for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })
    }

    async fn get<T>(&self, path: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(path)?;
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// POST a payload and decode the `data`/`error` envelope.
    async fn post<T, B>(&self, path: &str, payload: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let (status, body) = self.post_raw(path, payload).await?;

        // Rejections carry the error envelope regardless of status code.
        if let Ok(Envelope::<T>::Error { error }) = serde_json::from_str(&body) {
            return Err(Error::Rejected { message: error });
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        match serde_json::from_str::<Envelope<T>>(&body) {
            Ok(Envelope::Data { data }) => Ok(data),
            Ok(Envelope::Error { error }) => Err(Error::Rejected { message: error }),
            Err(e) => {
                let snippet = truncate_body(&body);
                tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
                Err(Error::RequestFailed)
            }
        }
    }

    /// POST a payload where only the status matters to the caller.
    async fn post_ack<B>(&self, path: &str, payload: &B) -> Result<(), Error>
    where
        B: Serialize,
    {
        let (status, body) = self.post_raw(path, payload).await?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(())
    }

    async fn post_raw<B>(&self, path: &str, payload: &B) -> Result<(reqwest::StatusCode, String), Error>
    where
        B: Serialize,
    {
        let url = self.get_url(path)?;
        let resp = self
            .http
            .post(url)
            .header("accept", "application/json, text/plain, */*")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to post resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        Ok((status, body))
    }

    /// Fetches the full list of parties.
    pub async fn get_parties(&self) -> Result<ListResponse<Party>, Error> {
        self.get::<ListResponse<Party>>("/api/parties").await
    }

    /// Creates a party. The API enforces slug uniqueness.
    pub async fn create_party(&self, party: &CreateParty) -> Result<Party, Error> {
        self.post::<Party, CreateParty>("/api/parties", party).await
    }

    /// Fetches the full politician roster.
    pub async fn get_politicians(&self) -> Result<ListResponse<Politician>, Error> {
        self.get::<ListResponse<Politician>>("/api/politicians").await
    }

    /// Creates a politician. Duplicate names come back as [`Error::Rejected`].
    pub async fn create_politician(
        &self,
        politician: &CreatePolitician,
    ) -> Result<Politician, Error> {
        self.post::<Politician, CreatePolitician>("/api/politicians", politician)
            .await
    }

    /// Upserts one politician's attendance figures for a month.
    pub async fn upsert_monthly_attendance(
        &self,
        attendance: &MonthlyAttendance,
    ) -> Result<(), Error> {
        self.post_ack("/api/attendance/monthly", attendance).await
    }

    /// Upserts one politician's attendance figures for a year.
    pub async fn upsert_yearly_attendance(
        &self,
        attendance: &YearlyAttendance,
    ) -> Result<(), Error> {
        self.post_ack("/api/attendance/yearly", attendance).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}
