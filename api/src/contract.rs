//! The endpoint surface the dashboard polls. Nothing here talks to a network:
//! implementations of [`DataSource`] decide where payloads come from.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{ActivityEvent, HealthEntry, MetricsSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Metrics,
    Activities,
    Health,
    /// Declared by the contract, not polled by the dashboard yet.
    Clients,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Metrics => "/api/v1/metrics",
            Endpoint::Activities => "/api/v1/activities",
            Endpoint::Health => "/api/v1/health",
            Endpoint::Clients => "/api/v1/clients",
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{endpoint} unavailable: {reason}")]
    Unavailable {
        endpoint: &'static str,
        reason: String,
    },
    #[error("malformed payload from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn unavailable(endpoint: Endpoint, reason: impl Into<String>) -> Self {
        FetchError::Unavailable {
            endpoint: endpoint.path(),
            reason: reason.into(),
        }
    }
}

/// Decode a response body for `endpoint` into its payload type.
pub fn decode<T: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|source| FetchError::Decode {
        endpoint: endpoint.path(),
        source,
    })
}

/// Anything that can answer the three dashboard queries.
///
/// The dashboard runs on a single-threaded executor, so the returned futures
/// are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot, FetchError>;

    async fn fetch_activities(&self) -> Result<Vec<ActivityEvent>, FetchError>;

    async fn fetch_health_status(&self) -> Result<Vec<HealthEntry>, FetchError>;
}
