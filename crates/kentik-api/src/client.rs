// Kentik HTTP client.
//
// Region selection picks the base hosts; auth headers ride on every
// request via the transport's default headers. Endpoint wrappers
// (plans, sites, labels, devices) are implemented as inherent methods
// in separate files to keep this module focused on transport mechanics.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Pinned API version for the device management endpoints.
pub const DEVICE_API_VERSION: &str = "v202308beta1";
/// Pinned API version for the site endpoints.
pub const SITE_API_VERSION: &str = "v202211";
/// Pinned API version for the label endpoints.
pub const LABEL_API_VERSION: &str = "v202210";

/// Kentik portal region. Selects between the US and EU API hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Us,
    Eu,
}

impl Region {
    /// Base URL of the classic portal API (v5 plans).
    pub fn portal_base(self) -> &'static str {
        match self {
            Self::Us => "https://api.kentik.com",
            Self::Eu => "https://api.kentik.eu",
        }
    }

    /// Base URL of the device management API (devices, sites, labels).
    pub fn device_base(self) -> &'static str {
        match self {
            Self::Us => "https://grpc.api.kentik.com",
            Self::Eu => "https://grpc.api.kentik.eu",
        }
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "US" => Ok(Self::Us),
            "EU" => Ok(Self::Eu),
            _ => Err(Error::InvalidRegion { region: s.into() }),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Us => write!(f, "US"),
            Self::Eu => write!(f, "EU"),
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Kentik REST APIs.
///
/// Wraps two base URLs (the portal API still serves plans; everything
/// else lives on the device management host) and a `reqwest::Client`
/// carrying the auth headers.
pub struct Client {
    http: reqwest::Client,
    portal_base: Url,
    device_base: Url,
}

impl Client {
    /// Build a client for the given region from credentials and transport
    /// settings.
    pub fn new(
        region: Region,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let headers = credentials.header_map()?;
        let http = transport.build_client_with_headers(headers)?;
        Self::with_base_urls(region.portal_base(), region.device_base(), http)
    }

    /// Build a client against explicit base URLs with a pre-built
    /// `reqwest::Client` (caller manages auth headers). Used by tests to
    /// point both API surfaces at a mock server.
    pub fn with_base_urls(
        portal_base: &str,
        device_base: &str,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            portal_base: Url::parse(portal_base)?,
            device_base: Url::parse(device_base)?,
        })
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{portal}/api/{path}` — classic portal API paths.
    pub(crate) fn portal_url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!(
            "{}/api/{path}",
            self.portal_base.as_str().trim_end_matches('/')
        ))?)
    }

    /// `{device_base}/{path}` — device management API paths.
    pub(crate) fn device_url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!(
            "{}/{path}",
            self.device_base.as_str().trim_end_matches('/')
        ))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
    ) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        Self::handle_response(operation, resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        operation: &'static str,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");
        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(operation, resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        operation: &'static str,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("PUT {url}");
        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(operation, resp).await
    }

    pub(crate) async fn delete(&self, operation: &'static str, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");
        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(operation, resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        operation: &'static str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(operation, status, resp).await)
        }
    }

    async fn handle_empty(operation: &'static str, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(operation, status, resp).await)
        }
    }

    async fn parse_error(
        operation: &'static str,
        status: reqwest::StatusCode,
        resp: reqwest::Response,
    ) -> Error {
        let body = resp.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Authentication {
                message: if body.is_empty() {
                    "credentials rejected by the Kentik API".into()
                } else {
                    body
                },
            };
        }

        Error::Api {
            operation,
            status: status.as_u16(),
            body: if body.is_empty() {
                status.to_string()
            } else {
                body
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Region;

    #[test]
    fn region_parses_case_insensitively() {
        assert_eq!("us".parse::<Region>().ok(), Some(Region::Us));
        assert_eq!("EU".parse::<Region>().ok(), Some(Region::Eu));
        assert!("APAC".parse::<Region>().is_err());
    }

    #[test]
    fn region_selects_hosts() {
        assert_eq!(Region::Eu.portal_base(), "https://api.kentik.eu");
        assert_eq!(Region::Us.device_base(), "https://grpc.api.kentik.com");
    }
}
