use dioxus::prelude::*;

use crate::core::timing;
use crate::t;
use crate::theme::{ThemeHandle, ThemePreference};

/// How long the thumb stays enlarged after a toggle.
const THUMB_PULSE_MS: u64 = 150;

/// Dark/light switch plus a "use system setting" button.
///
/// Activates on click, Enter and Space. Alt+T is bound globally by
/// [`use_theme_provider`](crate::theme::use_theme_provider).
#[component]
pub fn ThemeToggle() -> Element {
    let theme = use_context::<ThemeHandle>();
    let state = theme.state();
    let mut pulsing = use_signal(|| false);

    let activate = {
        let theme = theme.clone();
        move || {
            theme.toggle();
            pulsing.set(true);
            spawn(async move {
                timing::sleep_ms(THUMB_PULSE_MS).await;
                pulsing.set(false);
            });
        }
    };
    let mut on_click = activate.clone();
    let mut on_key = activate;

    let follow_system = {
        let theme = theme.clone();
        move |_| theme.use_system()
    };

    let label = state.theme.label();
    let aria_label = t!("theme-toggle-aria", theme = state.theme.as_str());
    let title = t!("theme-toggle-title", theme = state.theme.other().as_str());
    let is_light = state.theme == crate::theme::Theme::Light;
    let system_active = state.preference == ThemePreference::System;
    let system_class = if system_active {
        "preference-btn active"
    } else {
        "preference-btn"
    };
    let thumb_style = if pulsing() { "transform: scale(1.1);" } else { "" };

    rsx! {
        div { class: "theme-toggle-container",
            div {
                id: "themeToggle",
                class: "theme-toggle",
                role: "switch",
                tabindex: "0",
                aria_checked: "{is_light}",
                aria_label: "{aria_label}",
                title: "{title}",
                onclick: move |_| on_click(),
                onkeydown: move |evt: KeyboardEvent| {
                    let key = evt.key();
                    if key == Key::Enter || key == Key::Character(" ".to_string()) {
                        evt.prevent_default();
                        on_key();
                    }
                },
                span { class: "toggle-track",
                    span { class: "toggle-thumb", style: "{thumb_style}" }
                }
                span { id: "toggleLabel", class: "toggle-label", "{label}" }
            }
            button {
                class: "{system_class}",
                r#type: "button",
                aria_pressed: "{system_active}",
                onclick: follow_system,
                {t!("theme-use-system")}
            }
        }
    }
}
