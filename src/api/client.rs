//! Upstream API client.
//!
//! # Responsibilities
//! - Resolve the status message table before the client is usable
//! - Apply request defaults (JSON content type)
//! - Send through a `Transport` and normalize every outcome
//!
//! # Design Decisions
//! - Two-phase construction: `create` awaits the table load, so no live
//!   client ever sees a half-initialized table
//! - `run` is total: every path ends in an `Envelope`
//! - No retries; one failed attempt is normalized and returned

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::api::envelope::Envelope;
use crate::api::normalize::Normalizer;
use crate::api::status::StatusMessageTable;
use crate::api::transport::{ApiRequest, HttpTransport, Transport, TransportBuildError};
use crate::config::{ApiConfig, Environment};
use crate::observability::metrics;

/// Client for one upstream API. Owns its own status table.
#[derive(Debug)]
pub struct ApiClient<T = HttpTransport> {
    transport: T,
    normalizer: Normalizer,
}

impl ApiClient<HttpTransport> {
    /// Build a reqwest-backed client and resolve its status table.
    pub async fn create(
        config: &ApiConfig,
        environment: Environment,
    ) -> Result<Self, TransportBuildError> {
        let transport =
            HttpTransport::new(&config.base_url, Duration::from_secs(config.timeout_secs))?
                .reject_error_status(config.reject_error_status);

        let table = match config.status_messages_path.as_deref() {
            Some(path) => load_or_builtin(path).await,
            None => StatusMessageTable::builtin(),
        };

        tracing::info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            status_messages = table.len(),
            "API client initialized"
        );

        Ok(Self::with_transport(
            transport,
            table,
            environment.is_development(),
        ))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Build a client around any transport with an already resolved table.
    pub fn with_transport(transport: T, table: StatusMessageTable, log_failures: bool) -> Self {
        Self {
            transport,
            normalizer: Normalizer::new(table, log_failures),
        }
    }

    pub fn status_messages(&self) -> &StatusMessageTable {
        self.normalizer.table()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and normalize the outcome. Never fails.
    pub async fn run(&self, mut request: ApiRequest) -> Envelope {
        if !request.headers.contains_key(CONTENT_TYPE) {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let start = Instant::now();
        let method = request.method.clone();
        let path = request.path.clone();

        let result = self.transport.send(request).await;
        let envelope = self.normalizer.normalize(&result);

        metrics::record_upstream_call(method.as_str(), envelope.status, envelope.success, start);
        tracing::debug!(
            method = %method,
            path = %path,
            status = envelope.status,
            success = envelope.success,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream request completed"
        );

        envelope
    }
}

/// Load an external table, falling back to the built-in one on any failure.
pub async fn load_or_builtin(path: impl AsRef<Path>) -> StatusMessageTable {
    let path = path.as_ref();
    match StatusMessageTable::load(path).await {
        Ok(table) => {
            tracing::debug!(path = %path.display(), entries = table.len(), "Loaded status message table");
            table
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to load external status message table, using default table"
            );
            StatusMessageTable::builtin()
        }
    }
}
