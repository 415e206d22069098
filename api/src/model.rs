//! Payload shapes returned by the metrics, activities and health endpoints.
//!
//! Display values (`"$2.7M"`, `"99.98%"`) arrive pre-formatted, the way the
//! endpoints deliver them; numeric series stay numeric so the charts can
//! normalise them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub clients: ClientMetrics,
    pub transactions: TransactionMetrics,
    pub api: ApiMetrics,
    pub revenue: RevenueMetrics,
}

/// Key of one card on the metrics grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricGroup {
    Clients,
    Transactions,
    Api,
    Revenue,
}

impl MetricGroup {
    pub const ALL: [MetricGroup; 4] = [
        MetricGroup::Clients,
        MetricGroup::Transactions,
        MetricGroup::Api,
        MetricGroup::Revenue,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MetricGroup::Clients => "clients",
            MetricGroup::Transactions => "transactions",
            MetricGroup::Api => "api",
            MetricGroup::Revenue => "revenue",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMetrics {
    pub total: u32,
    pub enterprise: u32,
    pub growth: u32,
    pub startup: u32,
    pub trend: String,
    pub status: TrendStatus,
    pub history: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMetrics {
    pub volume: String,
    pub success_rate: String,
    pub avg_transaction: String,
    pub chargebacks: String,
    pub trend: String,
    pub history: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMetrics {
    pub uptime: String,
    pub uptime_value: f64,
    pub response_time: String,
    pub calls_today: String,
    pub error_rate: String,
    pub status: String,
    pub status_class: HealthState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueMetrics {
    pub monthly: String,
    pub platform_fees: String,
    pub transaction_fees: String,
    pub growth_rate: String,
    pub trend: String,
    pub breakdown: Vec<BreakdownSlice>,
}

/// One slice of the revenue mix, drawn as a bar in the revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// Direction of a metric trend, used as a CSS modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStatus {
    Positive,
    Negative,
    Neutral,
}

impl TrendStatus {
    /// Classify a signed percentage label such as `"+12%"`.
    /// Above +5 is positive, below -2 negative, anything else (or unparsable) neutral.
    pub fn from_trend(trend: &str) -> Self {
        let numeric = trend.trim().trim_end_matches('%').trim_start_matches('+');
        match numeric.parse::<f64>() {
            Ok(value) if value > 5.0 => TrendStatus::Positive,
            Ok(value) if value < -2.0 => TrendStatus::Negative,
            _ => TrendStatus::Neutral,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            TrendStatus::Positive => "positive",
            TrendStatus::Negative => "negative",
            TrendStatus::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: u64,
    pub client: String,
    pub plan: String,
    /// Relative label ("2 hours ago"); the feed never carries absolute times.
    pub time: String,
    pub status: ActivityStatus,
    pub tier: Tier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Success,
    Pending,
}

impl ActivityStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            ActivityStatus::Success => "success",
            ActivityStatus::Pending => "pending",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ActivityStatus::Success => "✓",
            ActivityStatus::Pending => "⏳",
        }
    }
}

/// Client segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Enterprise,
    Growth,
    Startup,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Startup, Tier::Growth, Tier::Enterprise];

    pub fn css_class(self) -> &'static str {
        match self {
            Tier::Enterprise => "enterprise",
            Tier::Growth => "growth",
            Tier::Startup => "startup",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEntry {
    pub service: String,
    pub status: HealthState,
    pub metric: String,
}

impl HealthEntry {
    /// Stable lookup key for incremental updates.
    pub fn slug(&self) -> String {
        slugify(&self.service)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Success,
    Warning,
    Error,
}

impl HealthState {
    /// Uptime thresholds: ≥ 99.9 is healthy, ≥ 99.5 degraded, lower is an outage.
    pub fn from_uptime(uptime: f64) -> Self {
        if uptime >= 99.9 {
            HealthState::Success
        } else if uptime >= 99.5 {
            HealthState::Warning
        } else {
            HealthState::Error
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            HealthState::Success => "success",
            HealthState::Warning => "warning",
            HealthState::Error => "error",
        }
    }
}

/// Lowercase the text and collapse every run of non-word characters
/// (anything outside `[A-Za-z0-9_]`) into a single `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_gap = false;
    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            slug.push(ch);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug
}
