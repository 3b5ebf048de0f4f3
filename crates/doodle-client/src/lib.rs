//! HTTP client for the doodle API.
//!
//! The typed operations return every failure as a [`ClientError`]. The
//! fail-soft wrappers (`fetch_day`, `fetch_today`, `submit`, `delete`) are for
//! UI paths: they log the failure and hand back an empty result instead.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

use doodle_codec::{Edge, PackedPixels};
use doodle_types::api::CreateDoodleRequest;
use doodle_types::{DayBucket, Doodle, KeyError, Timestamp};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    InvalidKey(#[from] KeyError),

    #[error("Invalid drawing. Must be {expected} chars, got {actual}.")]
    InvalidPayload { expected: usize, actual: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct DoodleClient {
    http: Client,
    base_url: String,
    edge: Edge,
}

impl DoodleClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>, edge: Edge) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            edge,
        }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    fn doodles_url(&self) -> String {
        format!("{}/doodles", self.base_url)
    }

    pub async fn list_by_day(&self, day_bucket: &str) -> Result<Vec<Doodle>, ClientError> {
        let day = DayBucket::parse(day_bucket)?;
        let resp = self
            .http
            .get(format!("{}/{}", self.doodles_url(), day))
            .send()
            .await?;
        read_json(resp).await
    }

    pub async fn get_one(&self, day_bucket: &str, created_at: &str) -> Result<Doodle, ClientError> {
        let (day, ts) = (DayBucket::parse(day_bucket)?, Timestamp::parse(created_at)?);
        let resp = self
            .http
            .get(format!("{}/{}/{}", self.doodles_url(), day, ts))
            .send()
            .await?;
        read_json(resp).await
    }

    pub async fn create(&self, pixels: &PackedPixels) -> Result<Doodle, ClientError> {
        if pixels.len() != self.edge.packed_len() {
            return Err(ClientError::InvalidPayload {
                expected: self.edge.packed_len(),
                actual: pixels.len(),
            });
        }

        let body = CreateDoodleRequest {
            pixels: pixels.clone(),
        };
        let resp = self.http.put(self.doodles_url()).json(&body).send().await?;
        read_json(resp).await
    }

    /// Returns the server's confirmation message.
    pub async fn remove(&self, day_bucket: &str, created_at: &str) -> Result<String, ClientError> {
        let (day, ts) = (DayBucket::parse(day_bucket)?, Timestamp::parse(created_at)?);
        let resp = self
            .http
            .delete(format!("{}/{}/{}", self.doodles_url(), day, ts))
            .send()
            .await?;
        read_json(resp).await
    }

    // -- Fail-soft wrappers --

    pub async fn fetch_day(&self, day: &DayBucket) -> Vec<Doodle> {
        match self.list_by_day(day.as_str()).await {
            Ok(doodles) => {
                debug!("Fetched {} doodles for {}", doodles.len(), day);
                doodles
            }
            Err(e) => {
                error!("Couldn't fetch doodles for {}: {}", day, e);
                Vec::new()
            }
        }
    }

    /// Everything posted so far on the current UTC day.
    pub async fn fetch_today(&self) -> Vec<Doodle> {
        self.fetch_day(&DayBucket::today()).await
    }

    pub async fn submit(&self, pixels: &PackedPixels) -> Option<Doodle> {
        self.create(pixels)
            .await
            .map_err(|e| error!("Couldn't post doodle: {}", e))
            .ok()
    }

    pub async fn delete(&self, doodle: &Doodle) -> bool {
        let (day, ts) = doodle.key();
        match self.remove(day.as_str(), &ts.to_string()).await {
            Ok(_) => true,
            Err(e) => {
                error!("Couldn't delete doodle {}/{}: {}", day, ts, e);
                false
            }
        }
    }
}

/// Success bodies are JSON; error bodies are a JSON string message.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<String>(&text).unwrap_or(text);
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound(message));
    }
    Err(ClientError::Rejected { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DoodleClient {
        // Discard port: nothing answers HTTP here.
        DoodleClient::new("http://127.0.0.1:9/", Edge::DEFAULT)
    }

    #[test]
    fn trims_base_url() {
        assert_eq!(client().doodles_url(), "http://127.0.0.1:9/doodles");
    }

    #[tokio::test]
    async fn validates_keys_before_sending() {
        let c = client();
        assert!(matches!(c.list_by_day("2023-02-24").await, Err(ClientError::InvalidKey(_))));
        assert!(matches!(
            c.get_one("23-02-24", "2023-02-24").await,
            Err(ClientError::InvalidKey(_))
        ));
        assert!(matches!(
            c.remove("23/02/24", "2023-02-24T04:04:38.569Z").await,
            Err(ClientError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn validates_payload_length_before_sending() {
        let err = client().create(&PackedPixels::from("abc")).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidPayload { expected: 64, actual: 3 }));
    }

    #[tokio::test]
    async fn fail_soft_on_unreachable_server() {
        let c = client();
        assert!(c.fetch_day(&DayBucket::parse("23-02-24").unwrap()).await.is_empty());

        let blank = PackedPixels::from_units(vec![0; Edge::DEFAULT.packed_len()]);
        assert!(c.submit(&blank).await.is_none());

        let doodle = Doodle::new(Timestamp::now(), blank);
        assert!(!c.delete(&doodle).await);
    }
}
