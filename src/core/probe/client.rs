//! Outbound HTTP client used by the evaluator
//!
//! The body is handed back as an unread stream so that it is only pulled off
//! the wire when a body regex is configured.

use futures::io::{AsyncRead, Cursor};
use std::fmt;
use std::pin::Pin;

use isahc::config::{Configurable, RedirectPolicy};
use isahc::{HttpClient, Request};

/// Redirects followed before the last response is taken as-is
pub const MAX_REDIRECTS: u32 = 10;

/// Status line plus the still-unread response body
pub struct ProbeResponse {
    pub status_code: u16,
    pub body: Pin<Box<dyn AsyncRead + Send>>,
}

impl ProbeResponse {
    pub fn new<R>(status_code: u16, body: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self {
            status_code,
            body: Box::pin(body),
        }
    }

    /// Response with a fully buffered body
    pub fn from_bytes(status_code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status_code, Cursor::new(body.into()))
    }
}

impl fmt::Debug for ProbeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeResponse")
            .field("status_code", &self.status_code)
            .finish_non_exhaustive()
    }
}

/// HTTP capability the evaluator depends on
#[async_trait::async_trait]
pub trait ProbeHttpClient: Send + Sync {
    /// Issue one plain GET to `url`
    ///
    /// # Returns
    /// * `Ok(ProbeResponse)` - Any completed response, whatever its status
    /// * `Err(String)` - The request could not be built or completed
    ///   (connection refused, DNS failure, malformed URL)
    async fn get(&self, url: String) -> Result<ProbeResponse, String>;
}

/// Production client on isahc with default settings: no timeout, no custom
/// headers, bounded redirect following
pub struct IsahcProbeClient {
    client: HttpClient,
}

impl IsahcProbeClient {
    pub fn new() -> Result<Self, isahc::Error> {
        let client = HttpClient::builder()
            .redirect_policy(RedirectPolicy::Limit(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ProbeHttpClient for IsahcProbeClient {
    async fn get(&self, url: String) -> Result<ProbeResponse, String> {
        let request = Request::get(url.as_str())
            .body(())
            .map_err(|e| format!("invalid request for {}: {}", url, e))?;

        let response = self
            .client
            .send_async(request)
            .await
            .map_err(|e| e.to_string())?;

        let status_code = response.status().as_u16();
        Ok(ProbeResponse::new(status_code, response.into_body()))
    }
}
