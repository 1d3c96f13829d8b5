use std::time::Duration;
use async_trait::async_trait;
use ap_core::{ContentFetcher, Result};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Larger documents are refused rather than parsed.
pub const DEFAULT_MAX_BYTES: usize = 20 * 1024 * 1024;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Downloads pages over HTTP(S). Every failure is logged and reported as
/// "no content" instead of an error.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_TIMEOUT, DEFAULT_MAX_BYTES)
    }

    pub fn with_options(timeout: Duration, max_bytes: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, max_bytes })
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<String>> {
        let parsed = match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => parsed,
            Ok(parsed) => {
                warn!("Refusing to fetch {}: unsupported scheme {}", url, parsed.scheme());
                return Ok(None);
            }
            Err(e) => {
                warn!("Refusing to fetch {}: {}", url, e);
                return Ok(None);
            }
        };

        let mut response = match self.client.get(parsed).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                return Ok(None);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Failed to fetch {}: HTTP {}", url, status);
            return Ok(None);
        }
        if response.content_length().is_some_and(|len| len as usize > self.max_bytes) {
            warn!("Failed to fetch {}: body exceeds {} bytes", url, self.max_bytes);
            return Ok(None);
        }

        let mut buffer: Vec<u8> = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    if buffer.len() + chunk.len() > self.max_bytes {
                        warn!("Failed to fetch {}: body exceeds {} bytes", url, self.max_bytes);
                        return Ok(None);
                    }
                    buffer.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read body of {}: {}", url, e);
                    return Ok(None);
                }
            }
        }

        let body = String::from_utf8_lossy(&buffer).into_owned();
        if body.trim().is_empty() {
            warn!("Fetched {} but the body is empty", url);
            return Ok(None);
        }

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(Some(body))
    }
}
