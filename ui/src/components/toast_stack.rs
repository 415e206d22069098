use dioxus::prelude::*;

use crate::shell::AppShell;
use crate::t;

/// Fixed stack of transient notifications, newest at the bottom.
#[component]
pub fn ToastStack() -> Element {
    let shell = use_context::<AppShell>();
    let dismiss_label = t!("notify-dismiss");
    let toasts = (shell.toasts)().into_iter().map(|toast| {
        let kind = toast.notification.kind.css_class();
        let class = if toast.leaving {
            format!("toast {kind} toast--leaving")
        } else {
            format!("toast {kind}")
        };
        (toast.notification.id, class, toast.notification.message)
    });

    rsx! {
        div { class: "toast-stack", role: "status", aria_live: "polite",
            for (id, class, message) in toasts {
                div { key: "{id}", class: "{class}",
                    span { class: "toast__message", "{message}" }
                    button {
                        class: "toast__dismiss",
                        r#type: "button",
                        aria_label: "{dismiss_label}",
                        onclick: move |_| shell.dismiss(id),
                        "×"
                    }
                }
            }
        }
    }
}
