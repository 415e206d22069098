//! Page-level state shared by every route: toasts, visibility and the
//! last-updated stamp. The dashboard coordinator talks to the page through
//! [`AppShell`]'s [`Host`] implementation.

use dioxus::logger::tracing::error;
use dioxus::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::core::browser::{self, FaultKind};
use crate::core::{platform, timing};
use crate::dashboard::{DashboardConfig, Host, Notification, NotificationKind};
use crate::t;

/// Slide-out duration before a dismissed toast is removed.
const TOAST_EXIT_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub notification: Notification,
    pub leaving: bool,
}

#[derive(Clone, Copy, PartialEq)]
pub struct AppShell {
    pub toasts: Signal<Vec<Toast>>,
    pub visible: Signal<bool>,
    pub last_update: Signal<Option<OffsetDateTime>>,
    config: Signal<DashboardConfig>,
}

impl AppShell {
    pub fn config(&self) -> DashboardConfig {
        self.config.peek().clone()
    }

    pub fn push(&self, kind: NotificationKind, message: impl Into<String>) {
        self.notify(Notification::new(kind, message));
    }

    /// Start the slide-out, then drop the toast.
    pub fn dismiss(&self, id: Uuid) {
        let mut toasts = self.toasts;
        if let Some(toast) = toasts
            .write()
            .iter_mut()
            .find(|toast| toast.notification.id == id)
        {
            toast.leaving = true;
        }
        platform::spawn_future(async move {
            timing::sleep_ms(TOAST_EXIT_MS).await;
            toasts
                .write()
                .retain(|toast| toast.notification.id != id);
        });
    }
}

impl Host for AppShell {
    fn notify(&self, notification: Notification) {
        let id = notification.id;
        let mut toasts = self.toasts;
        toasts.write().push(Toast {
            notification,
            leaving: false,
        });

        let shell = *self;
        let linger = self.config.peek().notification_ms;
        platform::spawn_future(async move {
            timing::sleep_ms(linger).await;
            shell.dismiss(id);
        });
    }

    fn is_visible(&self) -> bool {
        *self.visible.peek()
    }

    fn data_updated(&self, at: OffsetDateTime) {
        let mut last_update = self.last_update;
        last_update.set(Some(at));
    }
}

/// Provide the shell for this tree and start the page-level listeners:
/// visibility tracking and the global error/rejection toasts.
pub fn use_app_shell(config: DashboardConfig) -> AppShell {
    let shell = use_context_provider(|| AppShell {
        toasts: Signal::new(Vec::new()),
        visible: Signal::new(true),
        last_update: Signal::new(None),
        config: Signal::new(config),
    });

    use_hook(move || {
        let mut visible = shell.visible;
        spawn(async move {
            browser::watch_visibility(move |is_visible| visible.set(is_visible)).await;
        });

        spawn(async move {
            browser::watch_faults(move |fault| {
                error!("page fault ({:?}): {}", fault.kind, fault.message);
                let message = match fault.kind {
                    FaultKind::Error => t!("notify-unexpected"),
                    FaultKind::Rejection => t!("notify-async-failed"),
                };
                shell.push(NotificationKind::Error, message);
            })
            .await;
        });
    });

    shell
}
