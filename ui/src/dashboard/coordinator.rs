//! Startup sequence and polling for the dashboard page.
//!
//! The coordinator owns the three components, performs the initial load
//! (falling back to generated demo data when it fails), and drives two
//! repeating refresh loops:
//!
//! * a general refresh that re-fetches everything, skipped while a fetch is
//!   already in flight or the page is hidden;
//! * a critical refresh that re-fetches metrics only, skipped while the page
//!   is hidden. It does not look at the in-flight flag.
//!
//! Everything runs on one cooperative executor. Component state sits in
//! `RefCell`s that are never borrowed across an `.await`.

use std::cell::{Cell, RefCell};

use api::{DataSource, FetchError};
use dioxus::logger::tracing::{info, warn};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::core::format::format_clock;
use crate::core::timing;
use crate::data::{self, Payloads};
use crate::t;

use super::activity_list::{self, ActivityList};
use super::health_status::{self, HealthStatus};
use super::metrics_cards::{self, MetricsCards};
use super::surface::{Mount, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loading,
    Ready,
    /// Initial load failed; demo data is on screen.
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub refresh_interval_ms: u64,
    pub critical_refresh_interval_ms: u64,
    pub max_activities: usize,
    /// How long a toast stays up.
    pub notification_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 15_000,
            critical_refresh_interval_ms: 10_000,
            max_activities: activity_list::MAX_ACTIVITIES,
            notification_ms: 3_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NotificationKind::Info => "toast--info",
            NotificationKind::Success => "toast--success",
            NotificationKind::Warning => "toast--warning",
            NotificationKind::Error => "toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
        }
    }
}

/// What the coordinator needs from the page hosting it.
pub trait Host {
    fn notify(&self, notification: Notification);

    fn is_visible(&self) -> bool;

    /// Called after every successful render or update.
    fn data_updated(&self, at: OffsetDateTime);
}

pub struct Coordinator<D, S, H>
where
    D: DataSource,
    S: Surface,
    H: Host,
{
    source: D,
    host: H,
    config: DashboardConfig,
    metrics: RefCell<Option<MetricsCards<S>>>,
    activities: RefCell<Option<ActivityList<S>>>,
    health: RefCell<Option<HealthStatus<S>>>,
    phase: Cell<Phase>,
    is_loading: Cell<bool>,
    last_update: Cell<Option<OffsetDateTime>>,
}

impl<D, S, H> Coordinator<D, S, H>
where
    D: DataSource,
    S: Surface,
    H: Host,
{
    pub fn new(source: D, host: H, config: DashboardConfig) -> Self {
        Self {
            source,
            host,
            config,
            metrics: RefCell::new(None),
            activities: RefCell::new(None),
            health: RefCell::new(None),
            phase: Cell::new(Phase::Uninitialized),
            is_loading: Cell::new(false),
            last_update: Cell::new(None),
        }
    }

    /// Initialize components, then load the first data set.
    pub async fn init<M>(&self, mount: &M)
    where
        M: Mount<Surface = S>,
    {
        info!("initializing Ascend Payments dashboard");
        self.initialize_components(mount);
        self.load_initial_data().await;
        info!("dashboard initialized ({:?})", self.phase());
    }

    /// Bind every component to its container. A missing container leaves
    /// that component out; the others still run.
    pub fn initialize_components<M>(&self, mount: &M)
    where
        M: Mount<Surface = S>,
    {
        *self.metrics.borrow_mut() =
            MetricsCards::initialize(mount, metrics_cards::CONTAINER_ID)
                .inspect_err(|err| warn!("continuing without metrics cards: {err}"))
                .ok();
        *self.activities.borrow_mut() =
            ActivityList::initialize(mount, activity_list::CONTAINER_ID)
                .map(|list| list.with_limit(self.config.max_activities))
                .inspect_err(|err| warn!("continuing without activity list: {err}"))
                .ok();
        *self.health.borrow_mut() = HealthStatus::initialize(mount, health_status::CONTAINER_ID)
            .inspect_err(|err| warn!("continuing without health status: {err}"))
            .ok();
    }

    /// Fetch all three payloads concurrently and render them. On failure the
    /// components get generated demo data instead; this is never retried.
    pub async fn load_initial_data(&self) {
        self.phase.set(Phase::Loading);
        self.is_loading.set(true);

        match self.fetch_all().await {
            Ok(payloads) => {
                self.render_all(&payloads);
                self.phase.set(Phase::Ready);
                self.record_update();
                info!("initial data loaded");
                self.host.notify(Notification::new(
                    NotificationKind::Success,
                    t!("notify-loaded"),
                ));
            }
            Err(err) => {
                warn!("failed to load initial data: {err}");
                self.use_fallback();
                self.phase.set(Phase::Degraded);
                self.host.notify(Notification::new(
                    NotificationKind::Warning,
                    t!("notify-fallback"),
                ));
            }
        }

        self.is_loading.set(false);
    }

    /// Run both refresh loops until the hosting task is dropped.
    pub async fn run_background(&self) {
        let general = async {
            loop {
                timing::sleep_ms(self.config.refresh_interval_ms).await;
                self.on_refresh_tick().await;
            }
        };
        let critical = async {
            loop {
                timing::sleep_ms(self.config.critical_refresh_interval_ms).await;
                self.on_critical_tick().await;
            }
        };
        futures::future::join(general, critical).await;
    }

    /// General timer tick. Returns whether a refresh ran.
    pub async fn on_refresh_tick(&self) -> bool {
        if self.is_loading.get() || !self.host.is_visible() {
            return false;
        }
        self.refresh_data().await;
        true
    }

    /// Critical timer tick. Returns whether a refresh ran.
    pub async fn on_critical_tick(&self) -> bool {
        if !self.host.is_visible() {
            return false;
        }
        self.refresh_critical_metrics().await;
        true
    }

    /// Re-fetch everything and patch the components. Failures are logged and
    /// otherwise ignored.
    pub async fn refresh_data(&self) {
        self.is_loading.set(true);
        match self.fetch_all().await {
            Ok(payloads) => {
                self.update_all(&payloads);
                let at = self.record_update();
                info!("data updated at {}", format_clock(at));
            }
            Err(err) => warn!("background update failed: {err}"),
        }
        self.is_loading.set(false);
    }

    pub async fn refresh_critical_metrics(&self) {
        match self.source.fetch_metrics().await {
            Ok(metrics) => {
                if let Some(cards) = self.metrics.borrow_mut().as_mut() {
                    cards.update(&metrics);
                }
                self.record_update();
            }
            Err(err) => warn!("critical metrics update failed: {err}"),
        }
    }

    /// Route a click on a keyed item to the component owning `container_id`.
    pub fn click(&self, container_id: &str, key: &str) {
        match container_id {
            metrics_cards::CONTAINER_ID => {
                if let Some(cards) = self.metrics.borrow_mut().as_mut() {
                    cards.click(key);
                }
            }
            activity_list::CONTAINER_ID => {
                if let Some(list) = self.activities.borrow_mut().as_mut() {
                    list.click(key);
                }
            }
            health_status::CONTAINER_ID => {
                if let Some(panel) = self.health.borrow_mut().as_mut() {
                    panel.click(key);
                }
            }
            other => warn!("click on unknown container #{other}"),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    pub fn last_update(&self) -> Option<OffsetDateTime> {
        self.last_update.get()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn with_metrics<R>(&self, f: impl FnOnce(&MetricsCards<S>) -> R) -> Option<R> {
        self.metrics.borrow().as_ref().map(f)
    }

    pub fn with_activities<R>(&self, f: impl FnOnce(&ActivityList<S>) -> R) -> Option<R> {
        self.activities.borrow().as_ref().map(f)
    }

    pub fn with_health<R>(&self, f: impl FnOnce(&HealthStatus<S>) -> R) -> Option<R> {
        self.health.borrow().as_ref().map(f)
    }

    /// All three requests start together; the first error wins.
    async fn fetch_all(&self) -> Result<Payloads, FetchError> {
        let (metrics, activities, health) = futures::join!(
            self.source.fetch_metrics(),
            self.source.fetch_activities(),
            self.source.fetch_health_status()
        );
        Ok(Payloads {
            metrics: metrics?,
            activities: activities?,
            health: health?,
        })
    }

    fn render_all(&self, payloads: &Payloads) {
        if let Some(cards) = self.metrics.borrow_mut().as_mut() {
            cards.render(Some(&payloads.metrics));
        }
        if let Some(list) = self.activities.borrow_mut().as_mut() {
            list.render(Some(payloads.activities.as_slice()));
        }
        if let Some(panel) = self.health.borrow_mut().as_mut() {
            panel.render(Some(payloads.health.as_slice()));
        }
    }

    fn update_all(&self, payloads: &Payloads) {
        if let Some(cards) = self.metrics.borrow_mut().as_mut() {
            cards.update(&payloads.metrics);
        }
        if let Some(list) = self.activities.borrow_mut().as_mut() {
            list.update(&payloads.activities);
        }
        if let Some(panel) = self.health.borrow_mut().as_mut() {
            panel.update(&payloads.health);
        }
    }

    fn use_fallback(&self) {
        warn!("using mock data as fallback");
        self.render_all(&data::fallback());
    }

    fn record_update(&self) -> OffsetDateTime {
        let at = timing::now();
        self.last_update.set(Some(at));
        self.host.data_updated(at);
        at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::patch::Patch;
    use crate::dashboard::surface::{HeadlessMount, HeadlessSurface};
    use crate::data::{Latency, MockDataSource};
    use futures::executor::block_on;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct TestHost {
        notes: Rc<RefCell<Vec<Notification>>>,
        hidden: Rc<Cell<bool>>,
        updates: Rc<Cell<usize>>,
    }

    impl Host for TestHost {
        fn notify(&self, notification: Notification) {
            self.notes.borrow_mut().push(notification);
        }

        fn is_visible(&self) -> bool {
            !self.hidden.get()
        }

        fn data_updated(&self, _at: OffsetDateTime) {
            self.updates.set(self.updates.get() + 1);
        }
    }

    fn all_containers() -> HeadlessMount {
        HeadlessMount::new([
            metrics_cards::CONTAINER_ID,
            activity_list::CONTAINER_ID,
            health_status::CONTAINER_ID,
        ])
    }

    fn coordinator(host: TestHost) -> Coordinator<MockDataSource, HeadlessSurface, TestHost> {
        Coordinator::new(
            MockDataSource::new(Latency::none()),
            host,
            DashboardConfig::default(),
        )
    }

    #[test]
    fn config_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.refresh_interval_ms, 15_000);
        assert_eq!(config.critical_refresh_interval_ms, 10_000);
        assert_eq!(config.max_activities, 10);
        let partial: DashboardConfig =
            serde_json::from_str(r#"{ "refresh_interval_ms": 5000 }"#).unwrap();
        assert_eq!(partial.refresh_interval_ms, 5_000);
        assert_eq!(partial.notification_ms, 3_000);
    }

    #[test]
    fn successful_init_is_ready() {
        let host = TestHost::default();
        let coordinator = coordinator(host.clone());
        assert_eq!(coordinator.phase(), Phase::Uninitialized);

        block_on(coordinator.init(&all_containers()));

        assert_eq!(coordinator.phase(), Phase::Ready);
        assert!(!coordinator.is_loading());
        assert!(coordinator.last_update().is_some());
        let notes = host.notes.borrow();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Success);
        assert_eq!(
            coordinator.with_metrics(|cards| cards.surface().keys().len()),
            Some(4)
        );
        assert_eq!(
            coordinator.with_health(|panel| panel.surface().keys().len()),
            Some(4)
        );
    }

    #[test]
    fn missing_container_skips_component() {
        let coordinator = coordinator(TestHost::default());
        let mount = HeadlessMount::new([metrics_cards::CONTAINER_ID]);
        block_on(coordinator.init(&mount));
        assert_eq!(coordinator.phase(), Phase::Ready);
        assert!(coordinator.with_metrics(|_| ()).is_some());
        assert!(coordinator.with_activities(|_| ()).is_none());
        assert!(coordinator.with_health(|_| ()).is_none());
    }

    #[test]
    fn refresh_tick_respects_guard_and_visibility() {
        let host = TestHost::default();
        let coordinator = coordinator(host.clone());
        block_on(coordinator.init(&all_containers()));

        host.hidden.set(true);
        assert!(!block_on(coordinator.on_refresh_tick()));
        assert!(!block_on(coordinator.on_critical_tick()));

        host.hidden.set(false);
        coordinator.is_loading.set(true);
        assert!(!block_on(coordinator.on_refresh_tick()));
        // The critical timer has no in-flight guard.
        assert!(block_on(coordinator.on_critical_tick()));

        coordinator.is_loading.set(false);
        assert!(block_on(coordinator.on_refresh_tick()));
        assert!(!coordinator.is_loading());
    }

    #[test]
    fn refresh_patches_instead_of_replacing() {
        let host = TestHost::default();
        let coordinator = coordinator(host.clone());
        block_on(coordinator.init(&all_containers()));
        let before = host.updates.get();

        block_on(coordinator.refresh_data());

        assert_eq!(host.updates.get(), before + 1);
        let replaced = coordinator
            .with_metrics(|cards| {
                cards
                    .surface()
                    .patches()
                    .iter()
                    .filter(|p| matches!(p, Patch::Replace { .. }))
                    .count()
            })
            .unwrap();
        // Skeleton plus the initial render.
        assert_eq!(replaced, 2);
        assert_eq!(host.notes.borrow().len(), 1);
    }

    #[test]
    fn clicks_route_by_container() {
        let coordinator = coordinator(TestHost::default());
        block_on(coordinator.init(&all_containers()));
        coordinator.click(health_status::CONTAINER_ID, "fraud-detection");
        coordinator.click("nowhere", "fraud-detection");
        let flashes = coordinator
            .with_health(|panel| panel.surface().item("fraud-detection").unwrap().flashes.len())
            .unwrap();
        assert_eq!(flashes, 1);
    }
}
