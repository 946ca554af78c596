use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use crate::entities::NormalizedBooking;

pub const DEFAULT_SUBMISSION_URL: &str = "https://jsonplaceholder.typicode.com/posts";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Submission failed: {0}")]
    Status(StatusCode),

    #[error("Invalid submission URL: {0}")]
    InvalidUrl(String),
}

/// Sends a validated booking to the backend
#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    async fn submit(&self, booking: &NormalizedBooking) -> Result<serde_json::Value, SubmissionError>;
}

/// POSTs the booking as JSON and returns whatever JSON comes back
pub struct HttpSubmitter {
    client: Client,
    url: Url,
}

impl HttpSubmitter {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, SubmissionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let url = Url::parse(url).map_err(|e| SubmissionError::InvalidUrl(format!("'{}': {}", url, e)))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl BookingSubmitter for HttpSubmitter {
    async fn submit(&self, booking: &NormalizedBooking) -> Result<serde_json::Value, SubmissionError> {
        let response = self.client.post(self.url.clone()).json(booking).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Status(status));
        }

        Ok(response.json().await?)
    }
}
