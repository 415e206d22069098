//! Recent onboarding feed. New events slide in at the head; the list is capped.

use std::collections::HashSet;

use api::{ActivityEvent, Tier};
use dioxus::logger::tracing::{debug, error, info, warn};
use dioxus::prelude::*;
use serde::Deserialize;

use crate::i18n;
use crate::t;

use super::markup::{html, placeholder};
use super::patch::{Effect, Patch};
use super::surface::{Mount, Surface};
use super::DashboardError;

pub const CONTAINER_ID: &str = "activityListContainer";
pub const MAX_ACTIVITIES: usize = 10;

pub struct ActivityList<S: Surface> {
    surface: S,
    /// Last payload received; `None` while a skeleton or placeholder is shown.
    current: Option<Vec<ActivityEvent>>,
    limit: usize,
}

impl<S: Surface> ActivityList<S> {
    pub fn initialize<M>(mount: &M, container_id: &str) -> Result<Self, DashboardError>
    where
        M: Mount<Surface = S>,
    {
        i18n::init();
        let Some(mut surface) = mount.locate(container_id) else {
            error!("activity list container not found: {container_id}");
            return Err(DashboardError::MissingContainer(container_id.to_string()));
        };
        surface.apply(Patch::Replace {
            markup: loading_markup(),
            keys: Vec::new(),
        });
        info!("ActivityList initialized");
        Ok(Self {
            surface,
            current: None,
            limit: MAX_ACTIVITIES,
        })
    }

    /// Cap on displayed entries.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn render(&mut self, activities: Option<&[ActivityEvent]>) {
        self.current = activities.map(<[ActivityEvent]>::to_vec);
        let patch = match activities {
            Some(activities) => render_patch(activities, self.limit),
            None => placeholder_patch(&t!("activity-unavailable")),
        };
        self.surface.apply(patch);
    }

    pub fn render_json(&mut self, payload: &serde_json::Value) {
        match Vec::<ActivityEvent>::deserialize(payload).map_err(DashboardError::from) {
            Ok(activities) => self.render(Some(activities.as_slice())),
            Err(err) => {
                warn!("error rendering activities: {err}");
                self.current = None;
                self.surface
                    .apply(placeholder_patch(&t!("activity-unavailable")));
            }
        }
    }

    pub fn update(&mut self, activities: &[ActivityEvent]) {
        let patches = diff(self.current.as_deref(), activities, self.limit);
        if patches.iter().any(|patch| matches!(patch, Patch::Prepend { .. })) {
            debug!("activity feed: {} new entries", patches.len() - 1);
        }
        self.current = Some(activities.to_vec());
        self.surface.apply_all(patches);
    }

    pub fn click(&mut self, key: &str) {
        let Some(event) = self
            .current
            .iter()
            .flatten()
            .find(|event| event.id.to_string() == key)
        else {
            return;
        };
        info!("activity clicked: {} ({})", event.client, event.plan);
        self.surface.apply(Patch::Flash {
            key: key.to_string(),
            effect: Effect::SELECT,
        });
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Events in `next` whose ids are not in `current` are prepended, last one
/// first, so the head of the list ends up in `next`'s order; the list is then
/// cut to `limit`. An empty or missing current list is re-rendered in full.
pub fn diff(current: Option<&[ActivityEvent]>, next: &[ActivityEvent], limit: usize) -> Vec<Patch> {
    let current = match current {
        Some(current) if !current.is_empty() => current,
        _ => return vec![render_patch(next, limit)],
    };

    let known: HashSet<u64> = current.iter().map(|event| event.id).collect();
    let fresh: Vec<&ActivityEvent> = next
        .iter()
        .filter(|event| !known.contains(&event.id))
        .collect();
    if fresh.is_empty() {
        return Vec::new();
    }

    let mut patches: Vec<Patch> = fresh
        .into_iter()
        .rev()
        .map(|event| Patch::Prepend {
            key: event.id.to_string(),
            markup: html(item(event)),
        })
        .collect();
    patches.push(Patch::Truncate { keep: limit });
    patches
}

fn render_patch(activities: &[ActivityEvent], limit: usize) -> Patch {
    if activities.is_empty() {
        let message = t!("activity-empty");
        return Patch::Replace {
            markup: html(rsx! {
                div { class: "activity-item activity-item--empty",
                    p { class: "text-center", "{message}" }
                }
            }),
            keys: Vec::new(),
        };
    }
    let shown = &activities[..activities.len().min(limit)];
    Patch::Replace {
        markup: items_markup(shown),
        keys: shown.iter().map(|event| event.id.to_string()).collect(),
    }
}

fn placeholder_patch(message: &str) -> Patch {
    Patch::Replace {
        markup: placeholder("⚠️", message),
        keys: Vec::new(),
    }
}

pub fn items_markup(activities: &[ActivityEvent]) -> String {
    html(rsx! {
        for event in activities {
            {item(event)}
        }
    })
}

pub fn loading_markup() -> String {
    html(rsx! {
        div { class: "activity-item",
            div { class: "skeleton-loader skeleton-loader--avatar" }
            div { class: "activity-content",
                div { class: "skeleton-loader skeleton-loader--title" }
                div { class: "skeleton-loader skeleton-loader--line" }
                div { class: "skeleton-loader skeleton-loader--short" }
            }
            div { class: "skeleton-loader skeleton-loader--badge" }
        }
    })
}

fn tier_label(tier: Tier) -> String {
    match tier {
        Tier::Enterprise => t!("tier-enterprise"),
        Tier::Growth => t!("tier-growth"),
        Tier::Startup => t!("tier-startup"),
    }
}

fn item(event: &ActivityEvent) -> Element {
    let key = event.id.to_string();
    let icon_class = format!("activity-icon {}", event.status.css_class());
    let icon = event.status.icon();
    let badge_class = format!("activity-badge {}", event.tier.css_class());
    let tier = tier_label(event.tier);
    let client = &event.client;
    let plan = &event.plan;
    let time = &event.time;

    rsx! {
        div { class: "activity-item", "data-key": "{key}",
            div { class: "{icon_class}", "{icon}" }
            div { class: "activity-content",
                div { class: "activity-title", "{client}" }
                div { class: "activity-description", "{plan}" }
                div { class: "activity-time", "{time}" }
            }
            div { class: "{badge_class}", "{tier}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::surface::{HeadlessMount, HeadlessSurface};
    use api::ActivityStatus;
    use serde_json::json;

    fn event(id: u64) -> ActivityEvent {
        ActivityEvent {
            id,
            client: format!("Client {id}"),
            plan: "Growth plan - $25K MRR".into(),
            time: "Just now".into(),
            status: ActivityStatus::Success,
            tier: Tier::Growth,
        }
    }

    fn events(ids: &[u64]) -> Vec<ActivityEvent> {
        ids.iter().copied().map(event).collect()
    }

    fn list() -> ActivityList<HeadlessSurface> {
        let mount = HeadlessMount::new([CONTAINER_ID]);
        ActivityList::initialize(&mount, CONTAINER_ID).unwrap()
    }

    #[test]
    fn new_entries_are_prepended_in_incoming_order() {
        let mut list = list();
        list.render(Some(events(&[3, 2, 1]).as_slice()));
        list.update(&events(&[5, 4, 3, 2, 1]));

        let surface = list.surface();
        assert_eq!(surface.keys(), vec!["5", "4", "3", "2", "1"]);
        assert!(surface.item("5").unwrap().entered);
        assert!(surface.item("4").unwrap().entered);
        assert!(!surface.item("3").unwrap().entered);
    }

    #[test]
    fn list_is_capped_after_prepend() {
        let mut list = list();
        let initial: Vec<u64> = (1..=10).rev().collect();
        list.render(Some(events(&initial).as_slice()));

        let mut next = vec![13, 12, 11];
        next.extend(initial.iter().copied());
        list.update(&events(&next));

        let keys = list.surface().keys();
        assert_eq!(keys.len(), MAX_ACTIVITIES);
        assert_eq!(&keys[..3], &["13", "12", "11"]);
        assert_eq!(keys.last(), Some(&"4"));
    }

    #[test]
    fn initial_render_respects_limit() {
        let mount = HeadlessMount::new([CONTAINER_ID]);
        let mut list = ActivityList::initialize(&mount, CONTAINER_ID)
            .unwrap()
            .with_limit(2);
        list.render(Some(events(&[9, 8, 7]).as_slice()));
        assert_eq!(list.surface().keys(), vec!["9", "8"]);
    }

    #[test]
    fn unchanged_feed_produces_no_patches() {
        let current = events(&[2, 1]);
        assert!(diff(Some(current.as_slice()), &current, MAX_ACTIVITIES).is_empty());
    }

    #[test]
    fn empty_feed_rerenders_in_full() {
        let mut list = list();
        list.render(Some(&[][..]));
        assert!(list.surface().markup().contains("activity-item--empty"));

        list.update(&events(&[1]));
        assert_eq!(list.surface().keys(), vec!["1"]);
        assert!(!list.surface().item("1").unwrap().entered);
    }

    #[test]
    fn malformed_payload_shows_placeholder() {
        let mut list = list();
        list.render_json(&json!([{ "id": 1, "tier": "platinum" }]));
        assert!(list.surface().markup().contains("dashboard-placeholder"));

        list.render(None);
        assert!(list.surface().markup().contains("dashboard-placeholder"));
        assert!(list.surface().keys().is_empty());
    }

    #[test]
    fn markup_escapes_client_names() {
        let mut hostile = event(7);
        hostile.client = "<script>alert(1)</script>".into();
        let markup = items_markup(&[hostile]);
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("activity-badge growth"));
        assert!(markup.contains("data-key=\"7\""));
    }

    #[test]
    fn click_highlights_known_entries_only() {
        let mut list = list();
        list.render(Some(events(&[2, 1]).as_slice()));
        list.click("2");
        list.click("99");
        assert_eq!(list.surface().item("2").unwrap().flashes, vec![Effect::SELECT]);
        let flashes = list
            .surface()
            .patches()
            .iter()
            .filter(|p| matches!(p, Patch::Flash { .. }))
            .count();
        assert_eq!(flashes, 1);
    }
}
