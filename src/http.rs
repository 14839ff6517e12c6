//! Shared HTTP plumbing: client construction with a bounded timeout and a
//! small retry loop for transient failures.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{info, warn};

use crate::error::{MoverError, Result};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl HttpSettings {
    /// Backoff before the retry that follows `attempt` (1-based).
    fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

pub fn build_client(settings: &HttpSettings, headers: HeaderMap) -> Result<Client> {
    Client::builder()
        .timeout(settings.timeout)
        .default_headers(headers)
        .build()
        .map_err(MoverError::from)
}

/// Send the request produced by `build`, retrying transport errors, 429 and
/// 5xx responses up to `settings.max_attempts` times in total.
///
/// Non-2xx responses are turned into [`MoverError::ApiError`].
pub async fn send<F>(client: &Client, settings: &HttpSettings, build: F) -> Result<Response>
where
    F: Fn() -> RequestBuilder,
{
    let attempts = settings.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let request = build().build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        let outcome = match client.execute(request).await {
            Ok(response) => {
                info!("{method} {url} -- [{}]", response.status().as_u16());
                ensure_success(response).await
            }
            Err(e) => Err(MoverError::Http(e)),
        };

        match outcome {
            Err(e) if e.is_transient() && attempt < attempts => {
                let delay = settings.delay_after(attempt);
                warn!(%method, %url, attempt, ?delay, "request failed, retrying: {e}");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    Err(MoverError::ApiError {
        status: response.status().as_u16(),
        message: response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read response body>".to_string()),
    })
}
