//! The four KPI cards: clients, transaction volume, API performance, revenue.

use api::{MetricGroup, MetricsSnapshot};
use dioxus::logger::tracing::{error, info, warn};
use dioxus::prelude::*;
use serde::Deserialize;

use crate::i18n;
use crate::t;

use super::markup::{html, placeholder, skeleton};
use super::patch::{Effect, Patch};
use super::surface::{Mount, Surface};
use super::{viz, DashboardError};

pub const CONTAINER_ID: &str = "metricsCardsContainer";

pub struct MetricsCards<S: Surface> {
    surface: S,
    current: Option<MetricsSnapshot>,
}

impl<S: Surface> MetricsCards<S> {
    /// Bind to `container_id` and show the loading skeleton.
    pub fn initialize<M>(mount: &M, container_id: &str) -> Result<Self, DashboardError>
    where
        M: Mount<Surface = S>,
    {
        i18n::init();
        let Some(mut surface) = mount.locate(container_id) else {
            error!("metrics cards container not found: {container_id}");
            return Err(DashboardError::MissingContainer(container_id.to_string()));
        };
        surface.apply(Patch::Replace {
            markup: loading_markup(),
            keys: Vec::new(),
        });
        info!("MetricsCards initialized");
        Ok(Self {
            surface,
            current: None,
        })
    }

    /// Full render. `None` shows the "no data" placeholder.
    pub fn render(&mut self, snapshot: Option<&MetricsSnapshot>) {
        self.current = snapshot.cloned();
        let patches = match snapshot {
            Some(snapshot) => render_patches(snapshot),
            None => vec![placeholder_patch(&t!("metrics-unavailable"))],
        };
        self.surface.apply_all(patches);
    }

    /// Render an untyped payload; anything that is not a metrics snapshot
    /// shows the failure placeholder.
    pub fn render_json(&mut self, payload: &serde_json::Value) {
        match MetricsSnapshot::deserialize(payload).map_err(DashboardError::from) {
            Ok(snapshot) => self.render(Some(&snapshot)),
            Err(err) => {
                warn!("error rendering metrics cards: {err}");
                self.current = None;
                self.surface
                    .apply(placeholder_patch(&t!("metrics-failed")));
            }
        }
    }

    /// Patch the rendered cards in place, or render when nothing is shown yet.
    pub fn update(&mut self, next: &MetricsSnapshot) {
        let patches = diff(self.current.as_ref(), next);
        self.current = Some(next.clone());
        self.surface.apply_all(patches);
    }

    pub fn click(&mut self, key: &str) {
        let Some(group) = MetricGroup::from_key(key) else {
            return;
        };
        if let Some(snapshot) = &self.current {
            info!("card clicked: {} {}", key, primary_value(snapshot, group));
        }
        self.surface.apply(Patch::Flash {
            key: key.to_string(),
            effect: Effect::PRESS,
        });
    }

    pub fn current(&self) -> Option<&MetricsSnapshot> {
        self.current.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Patches turning `previous` into `next`. Without a previous snapshot this is
/// a full render. Text, class and breakdown patches are emitted only for
/// values that changed; every card flashes and the charts are redrawn.
pub fn diff(previous: Option<&MetricsSnapshot>, next: &MetricsSnapshot) -> Vec<Patch> {
    let Some(previous) = previous else {
        return render_patches(next);
    };

    let mut patches = Vec::new();
    for group in MetricGroup::ALL {
        let key = group.key().to_string();

        let value = primary_value(next, group);
        if value != primary_value(previous, group) {
            patches.push(Patch::SetText {
                key: key.clone(),
                part: "metric-value",
                text: value,
            });
        }

        if let Some(next_trend) = trend(next, group) {
            if Some(next_trend) != trend(previous, group) {
                patches.push(Patch::SetText {
                    key: key.clone(),
                    part: "metric-trend",
                    text: next_trend.to_string(),
                });
            }
            let class = trend_class(next, group);
            if class != trend_class(previous, group) {
                patches.push(Patch::SetClass {
                    key: key.clone(),
                    part: "metric-trend",
                    class,
                });
            }
        }

        let rows = breakdown_rows(next, group);
        if rows != breakdown_rows(previous, group) {
            patches.push(Patch::SetMarkup {
                key: key.clone(),
                part: "metric-breakdown",
                markup: html(breakdown_items(rows)),
            });
        }

        patches.push(Patch::Flash {
            key,
            effect: Effect::HIGHLIGHT,
        });
    }

    patches.extend(viz_patches(next));
    patches
}

fn render_patches(snapshot: &MetricsSnapshot) -> Vec<Patch> {
    let mut patches = vec![Patch::Replace {
        markup: cards_markup(snapshot),
        keys: MetricGroup::ALL
            .iter()
            .map(|group| group.key().to_string())
            .collect(),
    }];
    patches.extend(viz_patches(snapshot));
    patches
}

fn viz_patches(snapshot: &MetricsSnapshot) -> Vec<Patch> {
    let mut patches = Vec::new();
    patches.extend(viz::sparkline_patch(
        MetricGroup::Transactions.key(),
        &snapshot.transactions.history,
    ));
    patches.extend(viz::progress_patches(
        MetricGroup::Api.key(),
        snapshot.api.uptime_value,
        snapshot.api.status_class,
    ));
    patches.extend(viz::bar_chart_patch(
        MetricGroup::Revenue.key(),
        &snapshot.revenue.breakdown,
    ));
    patches
}

fn placeholder_patch(message: &str) -> Patch {
    Patch::Replace {
        markup: placeholder("📊", message),
        keys: Vec::new(),
    }
}

pub fn loading_markup() -> String {
    skeleton(MetricGroup::ALL.len(), "dashboard-card", 120)
}

/// Static markup for all four cards, charts included.
pub fn cards_markup(snapshot: &MetricsSnapshot) -> String {
    html(rsx! {
        for group in MetricGroup::ALL {
            {card(snapshot, group)}
        }
    })
}

fn primary_value(snapshot: &MetricsSnapshot, group: MetricGroup) -> String {
    match group {
        MetricGroup::Clients => snapshot.clients.total.to_string(),
        MetricGroup::Transactions => snapshot.transactions.volume.clone(),
        MetricGroup::Api => snapshot.api.uptime.clone(),
        MetricGroup::Revenue => snapshot.revenue.monthly.clone(),
    }
}

/// Trend label; the API card has none.
fn trend(snapshot: &MetricsSnapshot, group: MetricGroup) -> Option<&str> {
    match group {
        MetricGroup::Clients => Some(&snapshot.clients.trend),
        MetricGroup::Transactions => Some(&snapshot.transactions.trend),
        MetricGroup::Api => None,
        MetricGroup::Revenue => Some(&snapshot.revenue.trend),
    }
}

fn trend_class(snapshot: &MetricsSnapshot, group: MetricGroup) -> String {
    let status = match group {
        MetricGroup::Clients => snapshot.clients.status.css_class(),
        _ => "positive",
    };
    format!("metric-trend {status}")
}

/// (label, value, value class) rows under each card.
type BreakdownRow = (String, String, &'static str);

fn breakdown_rows(snapshot: &MetricsSnapshot, group: MetricGroup) -> Vec<BreakdownRow> {
    const PLAIN: &str = "breakdown-value";
    const GOOD: &str = "breakdown-value success";
    const WATCH: &str = "breakdown-value warning";

    match group {
        MetricGroup::Clients => {
            let clients = &snapshot.clients;
            vec![
                (
                    t!("breakdown-enterprise"),
                    t!("breakdown-client-count", count = clients.enterprise),
                    PLAIN,
                ),
                (
                    t!("breakdown-growth"),
                    t!("breakdown-client-count", count = clients.growth),
                    PLAIN,
                ),
                (
                    t!("breakdown-startup"),
                    t!("breakdown-client-count", count = clients.startup),
                    PLAIN,
                ),
            ]
        }
        MetricGroup::Transactions => {
            let tx = &snapshot.transactions;
            vec![
                (t!("breakdown-success-rate"), tx.success_rate.clone(), GOOD),
                (t!("breakdown-avg-transaction"), tx.avg_transaction.clone(), PLAIN),
                (t!("breakdown-chargebacks"), tx.chargebacks.clone(), WATCH),
            ]
        }
        MetricGroup::Api => {
            let api = &snapshot.api;
            vec![
                (t!("breakdown-avg-response"), api.response_time.clone(), GOOD),
                (t!("breakdown-api-calls"), api.calls_today.clone(), PLAIN),
                (t!("breakdown-error-rate"), api.error_rate.clone(), GOOD),
            ]
        }
        MetricGroup::Revenue => {
            let revenue = &snapshot.revenue;
            vec![
                (t!("breakdown-platform-fees"), revenue.platform_fees.clone(), PLAIN),
                (t!("breakdown-transaction-fees"), revenue.transaction_fees.clone(), PLAIN),
                (t!("breakdown-mrr-growth"), revenue.growth_rate.clone(), GOOD),
            ]
        }
    }
}

fn breakdown_items(rows: Vec<BreakdownRow>) -> Element {
    rsx! {
        for (label, value, class) in rows {
            div { class: "breakdown-item",
                span { class: "breakdown-label", "{label}" }
                span { class: "{class}", "{value}" }
            }
        }
    }
}

fn heading(group: MetricGroup) -> (&'static str, String, String) {
    match group {
        MetricGroup::Clients => ("👥", t!("card-clients-title"), t!("card-clients-label")),
        MetricGroup::Transactions => (
            "💳",
            t!("card-transactions-title"),
            t!("card-transactions-label"),
        ),
        MetricGroup::Api => ("🔧", t!("card-api-title"), t!("card-api-label")),
        MetricGroup::Revenue => ("💰", t!("card-revenue-title"), t!("card-revenue-label")),
    }
}

fn card(snapshot: &MetricsSnapshot, group: MetricGroup) -> Element {
    let key = group.key();
    let (icon, title, label) = heading(group);
    let value = primary_value(snapshot, group);
    let trend_text = trend(snapshot, group)
        .map(str::to_string)
        .unwrap_or_else(|| snapshot.api.status.clone());
    let trend_class = trend_class(snapshot, group);
    let status_bar = format!("card-status-bar {}", snapshot.clients.status.css_class());
    let chart = match group {
        MetricGroup::Transactions => Some((
            "viz-container sparkline-chart",
            viz::sparkline_markup(&snapshot.transactions.history, viz::DEFAULT_MAX_HEIGHT),
        )),
        MetricGroup::Revenue => Some((
            "viz-container bar-chart",
            viz::bar_chart_markup(&snapshot.revenue.breakdown, viz::DEFAULT_MAX_HEIGHT),
        )),
        _ => None,
    };
    let fill = viz::progress(snapshot.api.uptime_value, snapshot.api.status_class);
    let fill_class = fill.class;
    let fill_style = format!("width: {}", fill.width);
    let is_api = group == MetricGroup::Api;
    let rows = breakdown_rows(snapshot, group);

    rsx! {
        div { class: "dashboard-card", "data-key": "{key}",
            div { class: "card-header",
                div { class: "card-icon", "{icon}" }
                h3 { class: "card-title", "{title}" }
            }
            div { class: "card-content",
                if is_api {
                    div { class: "progress-bar-container",
                        div { class: "metric-value-label",
                            div { class: "metric-value", "{value}" }
                            div { class: "metric-label", "{label}" }
                        }
                        div { class: "progress-bar-track",
                            div { class: "{fill_class}", style: "{fill_style}" }
                        }
                    }
                    div { class: "{trend_class}",
                        span { "{trend_text}" }
                    }
                } else {
                    div { class: "metric-display",
                        div { class: "metric-value", "{value}" }
                        div { class: "metric-label", "{label}" }
                        div { class: "{trend_class}",
                            span { "{trend_text}" }
                        }
                    }
                }
                hr { class: "card-divider" }
                if let Some((chart, bars)) = chart {
                    div { class: "{chart}", dangerous_inner_html: "{bars}" }
                }
                div { class: "metric-breakdown", {breakdown_items(rows)} }
            }
            div { class: "{status_bar}" }
        }
    }
}
