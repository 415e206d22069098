use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::{AppNavbar, ToastStack};
use ui::dashboard::DashboardConfig;
use ui::shell::use_app_shell;
use ui::theme::use_theme_provider;
use ui::views::{Clients, Dashboard, Reports, Settings, Transactions};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Dashboard {},
    #[route("/clients")]
    Clients {},
    #[route("/transactions")]
    Transactions {},
    #[route("/reports")]
    Reports {},
    #[route("/settings")]
    Settings {},
}

const MAIN_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_dashboard(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", active_class: "active", to: Route::Dashboard {}, "{label}" })
}
fn nav_clients(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", active_class: "active", to: Route::Clients {}, "{label}" })
}
fn nav_transactions(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", active_class: "active", to: Route::Transactions {}, "{label}" })
}
fn nav_reports(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", active_class: "active", to: Route::Reports {}, "{label}" })
}
fn nav_settings(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", active_class: "active", to: Route::Settings {}, "{label}" })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    register_nav(NavBuilder {
        dashboard: nav_dashboard,
        clients: nav_clients,
        transactions: nav_transactions,
        reports: nav_reports,
        settings: nav_settings,
    });

    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    use_theme_provider();
    use_app_shell(DashboardConfig::default());

    rsx! {
        document::Style { "{MAIN_CSS}" }

        // Remount the routed tree when the language changes.
        div {
            key: "{lang_code()}",
            Router::<Route> {}
        }
        ToastStack {}
    }
}

/// Web router layout around the shared navbar.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar {}
        main { class: "app-main", Outlet::<Route> {} }
    }
}
