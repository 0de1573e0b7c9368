// Directory HTTP client
//
// Wraps `reqwest::Client` with base-URL handling and response decoding
// for the provider's collection endpoint.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::UserRecord;
use crate::transport::TransportConfig;

/// Path of the user collection, relative to the provider base URL.
const USERS_PATH: &str = "usuarios";

/// Max characters of an error body kept in `Error::Status`.
const BODY_PREVIEW_CHARS: usize = 200;

/// Raw HTTP client for the user directory provider.
///
/// The base URL may carry a path prefix (`https://host/api`); endpoint
/// paths are appended to it rather than replacing it.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DirectoryClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The provider base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The full URL of the user collection.
    pub fn users_url(&self) -> Result<Url, Error> {
        self.endpoint(USERS_PATH)
    }

    /// Fetch the complete user collection.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        let url = self.users_url()?;
        let users: Vec<UserRecord> = self.get(url).await?;
        debug!(count = users.len(), "fetched user collection");
        Ok(users)
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Join an endpoint path onto the base URL, keeping any base path.
    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Send a GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        let body = resp.text().await?;
        trace!(bytes = body.len(), "response body received");

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> DirectoryClient {
        DirectoryClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn users_url_at_root() {
        let c = client("http://localhost:3000");
        assert_eq!(
            c.users_url().unwrap().as_str(),
            "http://localhost:3000/usuarios"
        );
    }

    #[test]
    fn users_url_keeps_base_path() {
        let c = client("https://example.com/api/v1/");
        assert_eq!(
            c.users_url().unwrap().as_str(),
            "https://example.com/api/v1/usuarios"
        );
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "ñ".repeat(500);
        assert_eq!(preview(&long).chars().count(), BODY_PREVIEW_CHARS);
    }
}
