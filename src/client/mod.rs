#[cfg(test)]
mod tests;

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tokio::task;
use tracing::debug;
use url::Url;

/// Outcome of a single upstream GET. Non-2xx statuses are data here, not
/// errors; the tool layer decides how to surface them.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Value,
}

impl FetchResponse {
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Error),
    #[error("invalid JSON from upstream: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("request task failed: {0}")]
    Join(#[from] task::JoinError),
}

/// Thin HTTP client over a shared `ureq` agent. One GET per call, no retry,
/// no caching; every invocation allocates its own response data.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    agent: ureq::Agent,
}

impl UpstreamClient {
    #[inline]
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self { agent }
    }

    /// Issue a single GET and parse the body as JSON. The blocking call is
    /// offloaded to the blocking pool so concurrent tool invocations are not
    /// serialized on the async executor.
    #[inline]
    pub async fn get_json(&self, url: Url) -> Result<FetchResponse, FetchError> {
        debug!("GET {}", url);

        let agent = self.agent.clone();
        let target = url.to_string();

        let (status, text) =
            task::spawn_blocking(move || -> Result<(u16, String), ureq::Error> {
                let mut response = agent.get(&target).call()?;
                let status = response.status().as_u16();
                let text = response.body_mut().read_to_string()?;
                Ok((status, text))
            })
            .await??;

        debug!("Upstream responded with status {}", status);

        // Error bodies are not necessarily JSON; only 2xx bodies are parsed.
        let body = if (200..300).contains(&status) {
            serde_json::from_str(&text)?
        } else {
            Value::Null
        };

        Ok(FetchResponse { status, body })
    }
}
