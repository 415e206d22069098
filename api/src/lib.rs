//! Data contract for the Ascend dashboard: payload shapes, the (simulated)
//! endpoint surface, and the mock generator that stands in for a backend.

pub mod contract;
pub mod mock;
pub mod model;

pub use contract::{DataSource, Endpoint, FetchError};
pub use model::{
    slugify, ActivityEvent, ActivityStatus, ApiMetrics, BreakdownSlice, ClientMetrics,
    HealthEntry, HealthState, MetricGroup, MetricsSnapshot, RevenueMetrics, Tier,
    TransactionMetrics, TrendStatus,
};
