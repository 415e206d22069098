//! In-process stand-in for the dashboard API.

use api::{mock, ActivityEvent, DataSource, FetchError, HealthEntry, MetricsSnapshot};
use dioxus::logger::tracing::debug;
use serde::{Deserialize, Serialize};

use crate::core::timing;

/// Simulated response times per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Latency {
    pub metrics_ms: u64,
    pub activities_ms: u64,
    pub health_ms: u64,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            metrics_ms: 800,
            activities_ms: 600,
            health_ms: 400,
        }
    }
}

impl Latency {
    /// Answer immediately; used by tests and prerendering.
    pub fn none() -> Self {
        Self {
            metrics_ms: 0,
            activities_ms: 0,
            health_ms: 0,
        }
    }
}

/// Fresh random payloads after a fixed delay. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    latency: Latency,
}

impl MockDataSource {
    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }
}

impl DataSource for MockDataSource {
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot, FetchError> {
        timing::sleep_ms(self.latency.metrics_ms).await;
        debug!("mock metrics served");
        Ok(mock::metrics(&mut rand::thread_rng()))
    }

    async fn fetch_activities(&self) -> Result<Vec<ActivityEvent>, FetchError> {
        timing::sleep_ms(self.latency.activities_ms).await;
        Ok(mock::activities(&mut rand::thread_rng(), timing::now_ms()))
    }

    async fn fetch_health_status(&self) -> Result<Vec<HealthEntry>, FetchError> {
        timing::sleep_ms(self.latency.health_ms).await;
        Ok(mock::health(&mut rand::thread_rng()))
    }
}

/// One of each payload, generated synchronously.
#[derive(Debug, Clone, PartialEq)]
pub struct Payloads {
    pub metrics: MetricsSnapshot,
    pub activities: Vec<ActivityEvent>,
    pub health: Vec<HealthEntry>,
}

/// Demo data shown when the initial load fails.
pub fn fallback() -> Payloads {
    let mut rng = rand::thread_rng();
    Payloads {
        metrics: mock::metrics(&mut rng),
        activities: mock::activities(&mut rng, timing::now_ms()),
        health: mock::health(&mut rng),
    }
}
