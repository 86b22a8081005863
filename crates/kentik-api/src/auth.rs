// Kentik header-based authentication.
//
// Every request carries the account email and API token as fixed headers;
// there is no session or token-refresh flow.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Kentik API credentials: account email plus API token.
///
/// Built once at process start (from configuration) and passed by
/// reference wherever a client is constructed. The token is held in a
/// [`SecretString`] and marked sensitive on the wire header.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub token: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, token: SecretString) -> Self {
        Self {
            email: email.into(),
            token,
        }
    }

    /// Render the credentials as the default header map Kentik expects:
    /// `X-CH-Auth-Email` and `X-CH-Auth-API-Token`.
    pub fn header_map(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();

        let email_value =
            HeaderValue::from_str(&self.email).map_err(|e| Error::Authentication {
                message: format!("invalid email header value: {e}"),
            })?;
        headers.insert("X-CH-Auth-Email", email_value);

        let mut token_value = HeaderValue::from_str(self.token.expose_secret()).map_err(|e| {
            Error::Authentication {
                message: format!("invalid API token header value: {e}"),
            }
        })?;
        token_value.set_sensitive(true);
        headers.insert("X-CH-Auth-API-Token", token_value);

        Ok(headers)
    }
}
