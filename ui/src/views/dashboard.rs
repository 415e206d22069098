use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::browser;
use crate::core::format::format_clock;
use crate::dashboard::{activity_list, health_status, metrics_cards, Coordinator, EvalMount};
use crate::data::{Latency, MockDataSource};
use crate::shell::AppShell;
use crate::t;

const CONTAINERS: [&str; 3] = [
    metrics_cards::CONTAINER_ID,
    activity_list::CONTAINER_ID,
    health_status::CONTAINER_ID,
];

#[component]
pub fn Dashboard() -> Element {
    let shell = use_context::<AppShell>();
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();

    // Containers exist once the first render is mounted; start from there.
    use_effect(move || {
        let coordinator = Rc::new(Coordinator::new(
            MockDataSource::new(Latency::default()),
            shell,
            shell.config(),
        ));

        for container_id in CONTAINERS {
            let coordinator = Rc::clone(&coordinator);
            spawn(async move {
                browser::watch_item_clicks(container_id, move |key| {
                    coordinator.click(container_id, &key);
                })
                .await;
            });
        }

        spawn(async move {
            coordinator.init(&EvalMount::new(CONTAINERS)).await;
            coordinator.run_background().await;
        });
    });

    let updated = match (shell.last_update)() {
        Some(at) => t!("last-updated", time = format_clock(at)),
        None => t!("last-updated-pending"),
    };

    rsx! {
        document::Title { "Dashboard - Ascend Payments" }
        section { class: "page page-dashboard",
            div { class: "dashboard-header",
                div {
                    h1 { class: "dashboard-title", {t!("dashboard-title")} }
                    p { class: "dashboard-subtitle", {t!("dashboard-subtitle")} }
                }
                span { class: "last-updated", "{updated}" }
            }

            div { id: metrics_cards::CONTAINER_ID, class: "metrics-grid" }

            div { class: "dashboard-panels",
                div { class: "panel",
                    h2 { class: "panel-title", {t!("panel-activity-title")} }
                    div { id: activity_list::CONTAINER_ID, class: "activity-list" }
                }
                div { class: "panel",
                    h2 { class: "panel-title", {t!("panel-health-title")} }
                    div { id: health_status::CONTAINER_ID, class: "health-list" }
                }
            }
        }
    }
}
