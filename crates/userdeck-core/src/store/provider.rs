// ── Record providers ──
//
// The seam between the session and the external data provider. The
// session only needs "give me the whole collection"; the HTTP client is
// one implementation, tests plug in in-memory fakes.

use std::future::Future;
use std::time::Duration;

use tracing::debug;
use userdeck_api::transport::{TlsMode, TransportConfig};
use userdeck_api::DirectoryClient;

use crate::config::{BrowserConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::Record;

/// Source of the full record collection.
pub trait RecordProvider: Send + Sync + 'static {
    /// Fetch every record. Failures are reported, never retried here.
    fn fetch_records(&self) -> impl Future<Output = Result<Vec<Record>, CoreError>> + Send;
}

/// `RecordProvider` backed by the directory HTTP API.
#[derive(Debug, Clone)]
pub struct ApiProvider {
    client: DirectoryClient,
    timeout: Duration,
}

impl ApiProvider {
    /// Wrap an existing client.
    pub fn new(client: DirectoryClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Build the HTTP client from a `BrowserConfig`.
    pub fn from_config(config: &BrowserConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let client = DirectoryClient::new(config.api_url.clone(), &transport)?;
        Ok(Self::new(client, config.timeout))
    }

    pub fn client(&self) -> &DirectoryClient {
        &self.client
    }
}

impl RecordProvider for ApiProvider {
    async fn fetch_records(&self) -> Result<Vec<Record>, CoreError> {
        let users = self.client.list_users().await.map_err(|e| {
            match CoreError::from(e) {
                CoreError::Timeout { .. } => CoreError::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                },
                other => other,
            }
        })?;
        debug!(count = users.len(), "converting users to records");
        Ok(users.into_iter().map(Record::from).collect())
    }
}

fn build_transport(config: &BrowserConfig) -> TransportConfig {
    let tls = match &config.tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    };
    TransportConfig {
        tls,
        timeout: config.timeout,
    }
}
