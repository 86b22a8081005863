// Shared transport configuration for building reqwest::Client instances.
//
// Every outbound call carries the same fixed timeout; there is no retry
// on timeout or transient failure — a timeout surfaces as a terminal
// transport error.

use std::time::Duration;

use reqwest::header::HeaderMap;

/// Fixed per-request timeout applied to every call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with the given default headers.
    ///
    /// Used by [`crate::Client`] to inject the `X-CH-Auth-*` headers on
    /// every request.
    pub fn build_client_with_headers(
        &self,
        headers: HeaderMap,
    ) -> Result<reqwest::Client, crate::error::Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("kentik-cli/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;
        Ok(client)
    }
}
