//! Randomised payloads standing in for the backend.
//!
//! Every generator takes the RNG explicitly so callers (and tests) control
//! the stream. Values stay inside the same bands the live service reports.

use rand::Rng;

use crate::model::{
    ActivityEvent, ActivityStatus, ApiMetrics, BreakdownSlice, ClientMetrics, HealthEntry,
    HealthState, MetricsSnapshot, RevenueMetrics, Tier, TransactionMetrics, TrendStatus,
};

const BREAKDOWN_LABELS: [&str; 4] = ["Platform", "Processing", "Subscription", "Other"];
const BREAKDOWN_COLORS: [&str; 4] = ["#4361ee", "#4895ef", "#4cc9f0", "#7209b7"];

/// Probability that a poll surfaces a freshly signed-up client.
const NEW_SIGNUP_CHANCE: f64 = 0.3;
/// Probability that 3-D Secure reports elevated latency.
const SECURE_WARNING_CHANCE: f64 = 0.2;

pub fn metrics<R: Rng>(rng: &mut R) -> MetricsSnapshot {
    let api_uptime = 99.98;
    let clients_trend = "+12%";

    MetricsSnapshot {
        clients: ClientMetrics {
            total: 42 + rng.gen_range(0..5),
            enterprise: 8,
            growth: 24,
            startup: 10,
            trend: clients_trend.to_string(),
            status: TrendStatus::from_trend(clients_trend),
            history: history(rng, 12, 35, 50),
        },
        transactions: TransactionMetrics {
            volume: format!("${:.1}M", rng.gen_range(2.5..3.0)),
            success_rate: format!("{:.1}%", rng.gen_range(98.5..100.0)),
            avg_transaction: format!("${:.2}", rng.gen_range(85.0..95.0)),
            chargebacks: format!("{:.2}%", rng.gen_range(0.02..0.04)),
            trend: "+18%".to_string(),
            history: history(rng, 7, 20, 40),
        },
        api: ApiMetrics {
            uptime: format!("{api_uptime}%"),
            uptime_value: api_uptime,
            response_time: format!("{:.0}ms", rng.gen_range(130.0..150.0)),
            calls_today: group_thousands(rng.gen_range(280_000..290_000)),
            error_rate: "0.02%".to_string(),
            status: "Stable".to_string(),
            status_class: HealthState::from_uptime(api_uptime),
        },
        revenue: RevenueMetrics {
            monthly: dollars(rng.gen_range(82_000..87_000)),
            platform_fees: dollars(rng.gen_range(42_000..44_000)),
            transaction_fees: dollars(rng.gen_range(40_000..43_000)),
            growth_rate: format!("{:.1}%", rng.gen_range(14.0..16.0)),
            trend: "+22%".to_string(),
            breakdown: breakdown(rng),
        },
    }
}

/// Recent onboarding events, newest first. `now_ms` seeds the id of a new
/// signup so ids keep increasing across polls.
pub fn activities<R: Rng>(rng: &mut R, now_ms: u64) -> Vec<ActivityEvent> {
    let mut events = vec![
        ActivityEvent {
            id: 1,
            client: "TechFlow SaaS".to_string(),
            plan: "Enterprise plan - $50K MRR".to_string(),
            time: "2 hours ago".to_string(),
            status: ActivityStatus::Success,
            tier: Tier::Enterprise,
        },
        ActivityEvent {
            id: 2,
            client: "DataSphere Analytics".to_string(),
            plan: "Growth plan - $25K MRR".to_string(),
            time: "5 hours ago".to_string(),
            status: ActivityStatus::Success,
            tier: Tier::Growth,
        },
        ActivityEvent {
            id: 3,
            client: "CloudSecure API".to_string(),
            plan: "Underwriting in progress".to_string(),
            time: "Yesterday".to_string(),
            status: ActivityStatus::Pending,
            tier: Tier::Startup,
        },
    ];

    if rng.gen_bool(NEW_SIGNUP_CHANCE) {
        let tier = Tier::ALL[rng.gen_range(0..Tier::ALL.len())];
        events.insert(
            0,
            ActivityEvent {
                id: now_ms,
                client: format!("NewClient{}", rng.gen_range(0..100)),
                plan: "Signup completed".to_string(),
                time: "Just now".to_string(),
                status: ActivityStatus::Success,
                tier,
            },
        );
    }

    events
}

pub fn health<R: Rng>(rng: &mut R) -> Vec<HealthEntry> {
    let secure_status = if rng.gen_bool(SECURE_WARNING_CHANCE) {
        HealthState::Warning
    } else {
        HealthState::Success
    };
    // The metric line is drawn independently of the status.
    let secure_metric = if rng.gen_bool(SECURE_WARNING_CHANCE) {
        "Elevated latency in EU region"
    } else {
        "All regions operational"
    };

    vec![
        HealthEntry {
            service: "Payment Processing".to_string(),
            status: HealthState::Success,
            metric: "All systems operational".to_string(),
        },
        HealthEntry {
            service: "Subscription Engine".to_string(),
            status: HealthState::Success,
            metric: format!(
                "Processing {} renewals/hour",
                group_thousands(rng.gen_range(1_200..1_300))
            ),
        },
        HealthEntry {
            service: "3D Secure Service".to_string(),
            status: secure_status,
            metric: secure_metric.to_string(),
        },
        HealthEntry {
            service: "Fraud Detection".to_string(),
            status: HealthState::Success,
            metric: format!(
                "Blocked {} suspicious transactions",
                rng.gen_range(20..30)
            ),
        },
    ]
}

fn history<R: Rng>(rng: &mut R, count: usize, min: u32, max: u32) -> Vec<f64> {
    (0..count)
        .map(|_| f64::from(rng.gen_range(min..=max)))
        .collect()
}

/// Split a budget of 100 across the labels: each slice but the last takes a
/// random share of what remains, the last takes the remainder.
fn breakdown<R: Rng>(rng: &mut R) -> Vec<BreakdownSlice> {
    let mut remaining: u32 = 100;
    let mut values = Vec::with_capacity(BREAKDOWN_LABELS.len());
    for _ in 0..BREAKDOWN_LABELS.len() - 1 {
        let value = (rng.gen::<f64>() * f64::from(remaining) * 0.7).floor() as u32;
        values.push(value);
        remaining -= value;
    }
    values.push(remaining);

    BREAKDOWN_LABELS
        .iter()
        .zip(BREAKDOWN_COLORS)
        .zip(values)
        .map(|((label, color), value)| BreakdownSlice {
            label: (*label).to_string(),
            value: f64::from(value),
            color: color.to_string(),
        })
        .collect()
}

fn dollars(amount: u64) -> String {
    format!("${}", group_thousands(amount))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(1_250), "1,250");
        assert_eq!(group_thousands(284_113), "284,113");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
    }

    #[test]
    fn metrics_stay_in_bands() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let snapshot = metrics(&mut rng);
            assert!((42..47).contains(&snapshot.clients.total));
            assert_eq!(snapshot.clients.status, TrendStatus::Positive);
            assert_eq!(snapshot.clients.history.len(), 12);
            assert!(snapshot
                .clients
                .history
                .iter()
                .all(|v| (35.0..=50.0).contains(v)));
            assert_eq!(snapshot.transactions.history.len(), 7);
            assert_eq!(snapshot.api.status_class, HealthState::Success);
            assert!(snapshot.revenue.monthly.starts_with('$'));
        }
    }

    #[test]
    fn breakdown_consumes_budget_in_label_order() {
        let mut rng = StdRng::seed_from_u64(11);
        let slices = breakdown(&mut rng);
        let labels: Vec<_> = slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, BREAKDOWN_LABELS);
        let total: f64 = slices.iter().map(|s| s.value).sum();
        assert_eq!(total, 100.0);
        assert_eq!(slices[3].color, "#7209b7");
    }

    #[test]
    fn activities_have_unique_ids_and_newest_first() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut saw_signup = false;
        for tick in 0..40u64 {
            let events = activities(&mut rng, 1_700_000_000_000 + tick);
            let ids: HashSet<u64> = events.iter().map(|e| e.id).collect();
            assert_eq!(ids.len(), events.len());
            if events.len() == 4 {
                saw_signup = true;
                assert_eq!(events[0].time, "Just now");
                assert!(events[0].client.starts_with("NewClient"));
            }
        }
        assert!(saw_signup, "a 30% signup chance should fire within 40 polls");
    }

    #[test]
    fn health_slugs_are_unique() {
        let mut rng = StdRng::seed_from_u64(5);
        let entries = health(&mut rng);
        let slugs: HashSet<String> = entries.iter().map(HealthEntry::slug).collect();
        assert_eq!(slugs.len(), entries.len());
        assert!(slugs.contains("3d-secure-service"));
    }
}
