use thiserror::Error;

/// Top-level error type for the `kentik-api` crate.
///
/// Covers every failure mode of the HTTP surface: transport, auth,
/// non-success API responses, and response decoding. `kentik-core`
/// maps these into reconcile-level diagnostics. Nothing here is
/// retried — every variant is terminal for the invocation.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Authentication ──────────────────────────────────────────────
    /// Credentials rejected by the API (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Unusable region name in configuration.
    #[error("Invalid region '{region}' (expected US or EU)")]
    InvalidRegion { region: String },

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success response from a listing or mutating call.
    ///
    /// Carries the failing operation name, HTTP status, and the raw
    /// response body, so the caller can surface all three verbatim.
    #[error("Kentik API error in {operation} (HTTP {status}): {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a connection-level failure (as opposed
    /// to a well-formed error response from the API).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the request failed by hitting the fixed timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// The HTTP status of an API error response, if available.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
