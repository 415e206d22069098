//! Bridges to document-level browser events through `document::eval`.
//!
//! Each listener installs a small script in the page and forwards what it
//! observes back to Rust through `dioxus.send`. The same scripts run in the
//! browser and inside the desktop webview. All functions here must be awaited
//! from inside the Dioxus runtime.

use dioxus::document;
use dioxus::logger::tracing::{debug, warn};
use serde::Deserialize;

const VISIBILITY_SCRIPT: &str = r#"
const report = () => dioxus.send(document.visibilityState === 'visible');
report();
document.addEventListener('visibilitychange', report);
"#;

const COLOR_SCHEME_SCRIPT: &str = r#"
const query = window.matchMedia('(prefers-color-scheme: dark)');
dioxus.send(query.matches);
query.addEventListener('change', (event) => dioxus.send(event.matches));
"#;

const FAULT_SCRIPT: &str = r#"
window.addEventListener('error', (event) => {
  dioxus.send({ kind: 'error', message: String(event.message || event.error || 'unknown error') });
});
window.addEventListener('unhandledrejection', (event) => {
  dioxus.send({ kind: 'rejection', message: String(event.reason) });
});
"#;

const SHORTCUT_SCRIPT: &str = r#"
document.addEventListener('keydown', (event) => {
  if (event.altKey && (event.key === 't' || event.key === 'T')) {
    event.preventDefault();
    dioxus.send(true);
  }
});
"#;

/// Uncaught error or rejected promise reported by the page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageFault {
    pub kind: FaultKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultKind {
    Error,
    Rejection,
}

/// Encode a Rust string as a JavaScript string literal.
pub fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Run a script and ignore its result.
pub fn run(script: &str) {
    let _ = document::eval(script);
}

async fn listen<T, F>(script: &str, label: &str, mut on_value: F)
where
    T: serde::de::DeserializeOwned,
    F: FnMut(T),
{
    let mut eval = document::eval(script);
    loop {
        match eval.recv::<T>().await {
            Ok(value) => on_value(value),
            Err(err) => {
                warn!("{label} listener stopped: {err:?}");
                break;
            }
        }
    }
}

/// Report page visibility now and on every change.
pub async fn watch_visibility(on_change: impl FnMut(bool)) {
    listen(VISIBILITY_SCRIPT, "visibility", on_change).await;
}

/// Report whether the OS prefers a dark color scheme, now and on change.
pub async fn watch_color_scheme(on_change: impl FnMut(bool)) {
    listen(COLOR_SCHEME_SCRIPT, "color-scheme", on_change).await;
}

/// Forward uncaught page errors and unhandled promise rejections.
pub async fn watch_faults(on_fault: impl FnMut(PageFault)) {
    listen(FAULT_SCRIPT, "fault", on_fault).await;
}

/// Fire on the Alt+T keyboard shortcut.
pub async fn watch_theme_shortcut(mut on_press: impl FnMut()) {
    listen(SHORTCUT_SCRIPT, "shortcut", |_: bool| on_press()).await;
}

/// Forward the `data-key` of any keyed item clicked inside `container_id`.
pub async fn watch_item_clicks(container_id: &str, on_click: impl FnMut(String)) {
    let script = format!(
        r#"
const container = document.getElementById({id});
if (container) {{
  container.addEventListener('click', (event) => {{
    const item = event.target.closest('[data-key]');
    if (item && container.contains(item)) {{
      dioxus.send(item.getAttribute('data-key'));
    }}
  }});
}}
"#,
        id = js_string(container_id)
    );
    debug!("watching clicks in #{container_id}");
    listen(&script, "click", on_click).await;
}

/// Reflect the resolved theme on the document root and the mobile
/// `theme-color` meta tag.
pub fn apply_document_theme(theme: &str, meta_color: &str) {
    run(&format!(
        r#"
document.documentElement.setAttribute('data-theme', {theme});
let meta = document.querySelector('meta[name="theme-color"]');
if (!meta) {{
  meta = document.createElement('meta');
  meta.name = 'theme-color';
  document.head.appendChild(meta);
}}
meta.content = {color};
"#,
        theme = js_string(theme),
        color = js_string(meta_color)
    ));
}
