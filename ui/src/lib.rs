//! Shared UI crate for Ascend Payments. The dashboard, theme and page shell
//! live here; the web and desktop crates only mount the router.

pub mod core;
pub mod dashboard;
pub mod data;
pub mod i18n;
pub mod shell;
pub mod theme;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    mod theme_toggle;
    pub use theme_toggle::ThemeToggle;

    mod toast_stack;
    pub use toast_stack::ToastStack;
}
