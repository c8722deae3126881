//! Description document fetching.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::DEFAULT_FETCH_TIMEOUT;
use crate::error::FetchError;

/// User-Agent sent with every description request
pub const USER_AGENT: &str = concat!("satip-detect/", env!("CARGO_PKG_VERSION"));

/// A fetched description document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub body: String,
    /// Address of the server that answered, when the transport reports it.
    pub address: Option<IpAddr>,
}

impl Description {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            address: None,
        }
    }

    pub fn with_address(mut self, address: IpAddr) -> Self {
        self.address = Some(address);
        self
    }
}

/// Fetches a description document by URL.
#[async_trait]
pub trait DescriptionFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Description, FetchError>;
}

/// HTTP fetcher backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_default_timeout() -> Result<Self, FetchError> {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

#[async_trait]
impl DescriptionFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Description, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let address = response.remote_addr().map(|addr| addr.ip());
        let body = response.text().await.map_err(|e| request_error(url, e))?;

        Ok(Description { body, address })
    }
}

fn request_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
