//! Static markup shared by the dashboard components.

use dioxus::prelude::*;

/// Render an element tree to an HTML string.
pub(crate) fn html(element: Element) -> String {
    dioxus_ssr::render_element(element)
}

/// Error state shown in place of a component's content.
pub(crate) fn placeholder(icon: &str, message: &str) -> String {
    html(rsx! {
        div { class: "dashboard-placeholder",
            p { class: "dashboard-placeholder__icon", "{icon}" }
            p { class: "dashboard-placeholder__message", "{message}" }
        }
    })
}

/// `count` shimmering skeleton blocks of the given height.
pub(crate) fn skeleton(count: usize, item_class: &str, height_px: u32) -> String {
    html(rsx! {
        for index in 0..count {
            div { key: "{index}", class: "{item_class}",
                div { class: "skeleton-loader", style: "height: {height_px}px;" }
            }
        }
    })
}
