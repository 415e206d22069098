use dioxus::prelude::*;

use crate::dashboard::NotificationKind;
use crate::shell::AppShell;
use crate::t;

/// Placeholder for sections that are not built yet. Announces itself once
/// per visit.
#[component]
fn ComingSoon(title: String, route: String) -> Element {
    let shell = use_context::<AppShell>();
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();

    use_effect({
        let route = route.clone();
        move || shell.push(NotificationKind::Info, t!("notify-coming-soon", route = route.clone()))
    });

    rsx! {
        document::Title { "{title} - Ascend Payments" }
        section { class: "page page-coming-soon",
            h1 { "{title}" }
            p { {t!("page-coming-soon-body")} }
        }
    }
}

#[component]
pub fn Clients() -> Element {
    rsx! { ComingSoon { title: t!("nav-clients"), route: "clients".to_string() } }
}

#[component]
pub fn Transactions() -> Element {
    rsx! { ComingSoon { title: t!("nav-transactions"), route: "transactions".to_string() } }
}

#[component]
pub fn Reports() -> Element {
    rsx! { ComingSoon { title: t!("nav-reports"), route: "reports".to_string() } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { ComingSoon { title: t!("nav-settings"), route: "settings".to_string() } }
}
