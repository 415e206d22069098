//! Initial-load failure path: the coordinator must fall back to demo data,
//! warn once and never retry the failed requests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use api::{ActivityEvent, DataSource, Endpoint, FetchError, HealthEntry, MetricsSnapshot};
use futures::executor::block_on;
use time::OffsetDateTime;
use ui::dashboard::{
    activity_list, health_status, metrics_cards, Coordinator, DashboardConfig, HeadlessMount,
    Host, Notification, NotificationKind, Phase,
};

#[derive(Default)]
struct Calls {
    metrics: Cell<usize>,
    activities: Cell<usize>,
    health: Cell<usize>,
}

/// Every endpoint is down.
#[derive(Default, Clone)]
struct Offline {
    calls: Rc<Calls>,
}

impl DataSource for Offline {
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot, FetchError> {
        self.calls.metrics.set(self.calls.metrics.get() + 1);
        Err(FetchError::unavailable(Endpoint::Metrics, "connection refused"))
    }

    async fn fetch_activities(&self) -> Result<Vec<ActivityEvent>, FetchError> {
        self.calls.activities.set(self.calls.activities.get() + 1);
        Err(FetchError::unavailable(Endpoint::Activities, "connection refused"))
    }

    async fn fetch_health_status(&self) -> Result<Vec<HealthEntry>, FetchError> {
        self.calls.health.set(self.calls.health.get() + 1);
        Err(FetchError::unavailable(Endpoint::Health, "connection refused"))
    }
}

#[derive(Default, Clone)]
struct RecordingHost {
    notes: Rc<RefCell<Vec<Notification>>>,
    updates: Rc<Cell<usize>>,
}

impl Host for RecordingHost {
    fn notify(&self, notification: Notification) {
        self.notes.borrow_mut().push(notification);
    }

    fn is_visible(&self) -> bool {
        true
    }

    fn data_updated(&self, _at: OffsetDateTime) {
        self.updates.set(self.updates.get() + 1);
    }
}

fn mount() -> HeadlessMount {
    HeadlessMount::new([
        metrics_cards::CONTAINER_ID,
        activity_list::CONTAINER_ID,
        health_status::CONTAINER_ID,
    ])
}

#[test]
fn failed_initial_load_renders_demo_data() {
    let source = Offline::default();
    let host = RecordingHost::default();
    let coordinator = Coordinator::new(source.clone(), host.clone(), DashboardConfig::default());

    block_on(coordinator.init(&mount()));

    assert_eq!(coordinator.phase(), Phase::Degraded);
    assert!(!coordinator.is_loading());

    let notes = host.notes.borrow();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Warning);

    // Each endpoint was attempted exactly once.
    assert_eq!(source.calls.metrics.get(), 1);
    assert_eq!(source.calls.activities.get(), 1);
    assert_eq!(source.calls.health.get(), 1);

    let card_keys = coordinator
        .with_metrics(|cards| cards.surface().keys().len())
        .unwrap();
    assert_eq!(card_keys, 4);

    let has_seed_client = coordinator
        .with_activities(|list| list.surface().markup().contains("TechFlow SaaS"))
        .unwrap();
    assert!(has_seed_client);

    let has_processing = coordinator
        .with_health(|panel| panel.surface().item("payment-processing").is_some())
        .unwrap();
    assert!(has_processing);
}

#[test]
fn failed_refresh_keeps_previous_render() {
    let source = Offline::default();
    let host = RecordingHost::default();
    let coordinator = Coordinator::new(source.clone(), host.clone(), DashboardConfig::default());
    block_on(coordinator.init(&mount()));

    let before = coordinator
        .with_metrics(|cards| cards.surface().markup().to_string())
        .unwrap();

    assert!(block_on(coordinator.on_refresh_tick()));

    let after = coordinator
        .with_metrics(|cards| cards.surface().markup().to_string())
        .unwrap();
    assert_eq!(before, after);
    assert_eq!(coordinator.phase(), Phase::Degraded);
    assert!(coordinator.last_update().is_none());
    assert_eq!(host.updates.get(), 0);
    // Background failures are silent.
    assert_eq!(host.notes.borrow().len(), 1);
}
