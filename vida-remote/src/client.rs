use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument};
use vida_assistant::{ReplyError, ReplyRequest, ReplySource};

use crate::error::ReplyClientError;
use crate::types::ReplyResponse;

/// Client for the remote reply endpoint.
pub struct ReplyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ReplyClient {
    /// Creates a client posting to `endpoint` (a full URL).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Creates a client whose requests give up after `timeout`.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ReplyClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts one reply request.
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    pub async fn post(&self, request: &ReplyRequest) -> Result<ReplyResponse, ReplyClientError> {
        debug!("Sending reply request");

        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReplyClientError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;

        debug!("Received successful response");

        Ok(ReplyResponse::from_value(&body))
    }
}

impl ReplySource for ReplyClient {
    fn fetch_reply(
        &self,
        request: &ReplyRequest,
    ) -> impl Future<Output = Result<String, ReplyError>> + Send {
        async move {
            let response = self.post(request).await?;
            response
                .usable_reply()
                .map(String::from)
                .ok_or(ReplyError::MissingReply)
        }
    }
}
