use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use thiserror::Error;
use url::Url;

use crate::domain::ordering::ReorderPayload;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid endpoint `{endpoint}`: {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint `{endpoint}` answered with status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("submission task ended abnormally: {0}")]
    Aborted(String),
}

/// Capability that persists one payload at one endpoint.
#[async_trait]
pub trait PayloadSubmitter: Send + Sync {
    async fn submit(&self, endpoint: &str, payload: &ReorderPayload) -> Result<(), SubmitError>;
}

/// Submits payloads as JSON `POST` requests.
#[derive(Clone, Debug)]
pub struct HttpSubmitter {
    client: Client,
    base: Option<Url>,
}

impl HttpSubmitter {
    pub fn new(base: Option<Url>) -> Result<Self, SubmitError> {
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self::with_client(client, base))
    }

    pub fn with_client(client: Client, base: Option<Url>) -> Self {
        Self { client, base }
    }

    pub fn user_agent() -> &'static str {
        concat!("lectern/", env!("CARGO_PKG_VERSION"))
    }

    /// Absolute endpoints are used verbatim; relative ones are joined onto the
    /// base URL.
    pub fn resolve(&self, endpoint: &str) -> Result<Url, SubmitError> {
        let parsed = match Url::parse(endpoint) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match self.base.as_ref() {
                Some(base) => base.join(endpoint),
                None => Err(url::ParseError::RelativeUrlWithoutBase),
            },
            Err(err) => Err(err),
        };

        parsed.map_err(|source| SubmitError::Endpoint {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl PayloadSubmitter for HttpSubmitter {
    async fn submit(&self, endpoint: &str, payload: &ReorderPayload) -> Result<(), SubmitError> {
        let url = self.resolve(endpoint)?;
        let body = payload.to_json()?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
