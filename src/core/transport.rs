//! Delivery of chat requests to the remote endpoint.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::api::{ChatReply, ChatRequest};
use crate::core::config::data::Config;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Anything that can turn a chat request into a reply.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError>;
}

#[derive(Debug)]
pub enum TransportError {
    /// Connection, TLS or timeout failure before a response arrived.
    Request(reqwest::Error),

    /// The endpoint answered with a non-success status.
    Status { status: StatusCode, body: String },

    /// The response body was not the JSON object we expected.
    Decode(serde_json::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Request(err) => write!(f, "Request failed: {err}"),
            TransportError::Status { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    write!(f, "Endpoint returned {status}")
                } else {
                    write!(f, "Endpoint returned {status}: {body}")
                }
            }
            TransportError::Decode(err) => write!(f, "Malformed response: {err}"),
        }
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            TransportError::Request(err) => Some(err),
            TransportError::Status { .. } => None,
            TransportError::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Request(err)
    }
}

/// POSTs JSON to the configured endpoint with a static authorization header.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    authorization: String,
}

impl HttpTransport {
    /// Fails only if the HTTP client cannot be built (TLS backend setup).
    pub fn new(
        endpoint: impl Into<String>,
        authorization: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            authorization: authorization.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        Self::new(
            config.api_endpoint.clone(),
            config.authorization_header.clone(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        debug!(
            endpoint = %self.endpoint,
            history_len = request.chat_history.len(),
            "sending chat request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, &self.authorization)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%status, "chat endpoint rejected request");
            return Err(TransportError::Status { status, body });
        }

        serde_json::from_str::<ChatReply>(&body).map_err(TransportError::Decode)
    }
}
