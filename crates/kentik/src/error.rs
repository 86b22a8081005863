//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and API-level failures into user-facing errors with
//! actionable help text and distinct process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use kentik_core::CoreError;

/// Exit codes reported to the calling orchestration runtime.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Credentials / configuration ──────────────────────────────────
    #[error("No {what} configured")]
    #[diagnostic(
        code(kentik::no_credentials),
        help(
            "Set the {variable} environment variable,\n\
             or add it to the config file."
        )
    )]
    NoCredentials {
        what: &'static str,
        variable: &'static str,
    },

    #[error("Invalid region '{region}' (expected US or EU)")]
    #[diagnostic(
        code(kentik::invalid_region),
        help("Set KENTIK_REGION (or --region) to US or EU.")
    )]
    InvalidRegion { region: String },

    #[error(transparent)]
    #[diagnostic(code(kentik::config))]
    Config(Box<figment::Error>),

    // ── Spec input ───────────────────────────────────────────────────
    #[error("Could not load device spec from {path}")]
    #[diagnostic(
        code(kentik::spec_file),
        help("{reason}")
    )]
    SpecFile { path: String, reason: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{entity} '{name}' does not exist")]
    #[diagnostic(
        code(kentik::not_found),
        help("Referenced plans, sites, and labels must already exist; matching is exact.")
    )]
    NotFound { entity: &'static str, name: String },

    // ── API / transport ──────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(kentik::auth_failed),
        help("Verify KENTIK_EMAIL and KENTIK_TOKEN against your Kentik portal profile.")
    )]
    AuthFailed { message: String },

    #[error("Kentik API error in {operation} (HTTP {status}): {message}")]
    #[diagnostic(code(kentik::api_error))]
    Api {
        operation: String,
        status: u16,
        message: String,
    },

    #[error("Could not reach the Kentik API: {message}")]
    #[diagnostic(
        code(kentik::connection_failed),
        help("Check network reachability and the configured region.")
    )]
    ConnectionFailed { message: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(kentik::timeout),
        help("Increase the timeout with --timeout or check API responsiveness.")
    )]
    Timeout { seconds: u64 },

    #[error("Unexpected response from the Kentik API: {message}")]
    #[diagnostic(code(kentik::bad_response))]
    BadResponse { message: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::SpecFile { .. } | Self::InvalidRegion { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError / api::Error → CliError mapping ────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, name } => Self::NotFound { entity, name },
            CoreError::Api(api) => Self::from(api),
        }
    }
}

impl From<kentik_api::Error> for CliError {
    fn from(err: kentik_api::Error) -> Self {
        match err {
            kentik_api::Error::Authentication { message } => Self::AuthFailed { message },

            kentik_api::Error::InvalidRegion { region } => Self::InvalidRegion { region },

            kentik_api::Error::Api {
                operation,
                status,
                body,
            } => Self::Api {
                operation: operation.into(),
                status,
                message: body,
            },

            kentik_api::Error::Transport(e) if e.is_timeout() => Self::Timeout {
                seconds: kentik_api::transport::DEFAULT_TIMEOUT_SECS,
            },

            kentik_api::Error::Transport(e) => Self::ConnectionFailed {
                message: e.to_string(),
            },

            kentik_api::Error::InvalidUrl(e) => Self::ConnectionFailed {
                message: e.to_string(),
            },

            kentik_api::Error::Deserialization { message, .. } => Self::BadResponse { message },
        }
    }
}
