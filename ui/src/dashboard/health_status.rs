//! Service health rows, keyed by the slug of the service name.

use std::collections::BTreeMap;

use api::{HealthEntry, HealthState};
use dioxus::logger::tracing::{error, info, warn};
use dioxus::prelude::*;
use serde::Deserialize;

use crate::i18n;
use crate::t;

use super::markup::{html, placeholder};
use super::patch::{Effect, Patch};
use super::surface::{Mount, Surface};
use super::DashboardError;

pub const CONTAINER_ID: &str = "healthStatusContainer";
const SKELETON_ROWS: usize = 4;

/// Status each rendered row carries in its `data-status` attribute.
pub type RenderedStatus = BTreeMap<String, HealthState>;

pub struct HealthStatus<S: Surface> {
    surface: S,
    current: Vec<HealthEntry>,
    /// `None` while a skeleton or placeholder is shown.
    rendered: Option<RenderedStatus>,
}

impl<S: Surface> HealthStatus<S> {
    pub fn initialize<M>(mount: &M, container_id: &str) -> Result<Self, DashboardError>
    where
        M: Mount<Surface = S>,
    {
        i18n::init();
        let Some(mut surface) = mount.locate(container_id) else {
            error!("health status container not found: {container_id}");
            return Err(DashboardError::MissingContainer(container_id.to_string()));
        };
        surface.apply(Patch::Replace {
            markup: loading_markup(),
            keys: Vec::new(),
        });
        info!("HealthStatus initialized");
        Ok(Self {
            surface,
            current: Vec::new(),
            rendered: None,
        })
    }

    pub fn render(&mut self, entries: Option<&[HealthEntry]>) {
        match entries {
            Some(entries) => {
                self.current = entries.to_vec();
                self.rendered = Some(statuses(entries));
                self.surface.apply(render_patch(entries));
            }
            None => self.show_placeholder(),
        }
    }

    pub fn render_json(&mut self, payload: &serde_json::Value) {
        match Vec::<HealthEntry>::deserialize(payload).map_err(DashboardError::from) {
            Ok(entries) => self.render(Some(entries.as_slice())),
            Err(err) => {
                warn!("error rendering health status: {err}");
                self.show_placeholder();
            }
        }
    }

    pub fn update(&mut self, entries: &[HealthEntry]) {
        let Some(rendered) = self.rendered.as_mut() else {
            self.render(Some(entries));
            return;
        };
        let patches = diff(rendered, entries);
        for entry in entries {
            if let Some(status) = rendered.get_mut(&entry.slug()) {
                *status = entry.status;
            }
        }
        self.current = entries.to_vec();
        self.surface.apply_all(patches);
    }

    pub fn click(&mut self, key: &str) {
        let Some(entry) = self.current.iter().find(|entry| entry.slug() == key) else {
            return;
        };
        info!("health item clicked: {} [{}]", entry.service, entry.status.css_class());
        self.surface.apply(Patch::Flash {
            key: key.to_string(),
            effect: Effect::PRESS,
        });
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn show_placeholder(&mut self) {
        self.current.clear();
        self.rendered = None;
        self.surface.apply(Patch::Replace {
            markup: placeholder("🔄", &t!("health-unavailable")),
            keys: Vec::new(),
        });
    }
}

/// In-place patches for rows already on screen. Entries whose slug is not
/// rendered are skipped. A status change pulses the row and rewrites its
/// `data-status`.
pub fn diff(rendered: &RenderedStatus, entries: &[HealthEntry]) -> Vec<Patch> {
    let mut patches = Vec::new();
    for entry in entries {
        let key = entry.slug();
        let Some(previous) = rendered.get(&key) else {
            continue;
        };
        let status = entry.status.css_class();
        patches.push(Patch::SetClass {
            key: key.clone(),
            part: "health-status",
            class: format!("health-status {status}"),
        });
        patches.push(Patch::SetText {
            key: key.clone(),
            part: "health-metric",
            text: entry.metric.clone(),
        });
        if *previous != entry.status {
            patches.push(Patch::Flash {
                key: key.clone(),
                effect: Effect::PULSE,
            });
            patches.push(Patch::SetAttr {
                key,
                name: "data-status",
                value: status.to_string(),
            });
        }
    }
    patches
}

fn statuses(entries: &[HealthEntry]) -> RenderedStatus {
    entries
        .iter()
        .map(|entry| (entry.slug(), entry.status))
        .collect()
}

fn render_patch(entries: &[HealthEntry]) -> Patch {
    Patch::Replace {
        markup: rows_markup(entries),
        keys: entries.iter().map(HealthEntry::slug).collect(),
    }
}

pub fn rows_markup(entries: &[HealthEntry]) -> String {
    html(rsx! {
        for entry in entries {
            {row(entry)}
        }
    })
}

pub fn loading_markup() -> String {
    html(rsx! {
        for index in 0..SKELETON_ROWS {
            div { key: "{index}", class: "health-item",
                div { class: "skeleton-loader skeleton-loader--dot" }
                div { class: "health-info",
                    div { class: "skeleton-loader skeleton-loader--title" }
                    div { class: "skeleton-loader skeleton-loader--line" }
                }
            }
        }
    })
}

fn row(entry: &HealthEntry) -> Element {
    let key = entry.slug();
    let status = entry.status.css_class();
    let service = &entry.service;
    let metric = &entry.metric;

    rsx! {
        div { class: "health-item", "data-key": "{key}", "data-status": "{status}",
            div { class: "health-status {status}" }
            div { class: "health-info",
                div { class: "health-title", "{service}" }
                div { class: "health-metric", "{metric}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::surface::{HeadlessMount, HeadlessSurface};
    use serde_json::json;

    fn entry(service: &str, status: HealthState, metric: &str) -> HealthEntry {
        HealthEntry {
            service: service.into(),
            status,
            metric: metric.into(),
        }
    }

    fn panel() -> HealthStatus<HeadlessSurface> {
        let mount = HeadlessMount::new([CONTAINER_ID]);
        HealthStatus::initialize(&mount, CONTAINER_ID).unwrap()
    }

    fn baseline() -> Vec<HealthEntry> {
        vec![
            entry("Payment Processing", HealthState::Success, "All systems operational"),
            entry("3D Secure Service", HealthState::Success, "All regions operational"),
        ]
    }

    #[test]
    fn render_keys_rows_by_slug() {
        let mut panel = panel();
        panel.render(Some(baseline().as_slice()));
        assert_eq!(
            panel.surface().keys(),
            vec!["payment-processing", "3d-secure-service"]
        );
        assert!(panel.surface().markup().contains("data-status=\"success\""));
    }

    #[test]
    fn status_change_pulses_and_rewrites_attribute() {
        let mut panel = panel();
        panel.render(Some(baseline().as_slice()));

        let mut next = baseline();
        next[1].status = HealthState::Warning;
        next[1].metric = "Elevated latency in EU region".into();
        panel.update(&next);

        let secure = panel.surface().item("3d-secure-service").unwrap();
        assert_eq!(secure.flashes, vec![Effect::PULSE]);
        assert_eq!(secure.attrs.get("data-status").map(String::as_str), Some("warning"));
        assert_eq!(
            secure.part("health-status").unwrap().class.as_deref(),
            Some("health-status warning")
        );
        assert_eq!(
            secure.part("health-metric").unwrap().text.as_deref(),
            Some("Elevated latency in EU region")
        );

        let payments = panel.surface().item("payment-processing").unwrap();
        assert!(payments.flashes.is_empty());

        // Same status again: no second pulse.
        panel.update(&next);
        let secure = panel.surface().item("3d-secure-service").unwrap();
        assert_eq!(secure.flashes, vec![Effect::PULSE]);
    }

    #[test]
    fn unknown_slugs_are_skipped() {
        let rendered = statuses(&baseline());
        let mut next = baseline();
        next.push(entry("Ledger Sync", HealthState::Error, "Down"));
        let patches = diff(&rendered, &next);
        assert!(patches.iter().all(|p| p.key() != Some("ledger-sync")));
        assert_eq!(patches.len(), 4);
    }

    #[test]
    fn update_without_render_is_a_full_render() {
        let mut panel = panel();
        panel.update(&baseline());
        assert_eq!(panel.surface().keys().len(), 2);
    }

    #[test]
    fn malformed_payload_shows_placeholder() {
        let mut panel = panel();
        panel.render_json(&json!({ "service": "not a list" }));
        assert!(panel.surface().markup().contains("dashboard-placeholder"));

        panel.render(None);
        assert!(panel.surface().markup().contains("dashboard-placeholder"));
    }

    #[test]
    fn click_presses_row() {
        let mut panel = panel();
        panel.render(Some(baseline().as_slice()));
        panel.click("payment-processing");
        assert_eq!(
            panel.surface().item("payment-processing").unwrap().flashes,
            vec![Effect::PRESS]
        );
    }
}
