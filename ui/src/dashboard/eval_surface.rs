//! Surface backed by the live document, driven through `document::eval`.

use crate::core::browser::{js_string, run};
use crate::core::{platform, timing};

use super::patch::{Effect, Patch};
use super::surface::{Mount, Surface};

/// Lookup helpers prepended to every patch script.
const PRELUDE: &str = r#"
const root = document.getElementById(__CONTAINER__);
const item = (key) => root ? root.querySelector(`[data-key="${CSS.escape(key)}"]`) : null;
const part = (key, cls) => { const el = item(key); return el ? el.querySelector('.' + cls) : null; };
"#;

/// One container element of the rendered page.
#[derive(Debug, Clone)]
pub struct EvalSurface {
    container_id: String,
}

impl EvalSurface {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }

    fn script(&self, body: &str) -> String {
        let mut script = PRELUDE.replace("__CONTAINER__", &js_string(&self.container_id));
        script.push_str(body);
        script
    }
}

impl Surface for EvalSurface {
    fn apply(&mut self, patch: Patch) {
        if let Patch::Flash { key, effect } = &patch {
            let revert = self.script(&revert_body(key, effect));
            let duration = effect.duration_ms;
            platform::spawn_future(async move {
                timing::sleep_ms(duration).await;
                run(&revert);
            });
        }
        run(&self.script(&patch_body(&patch)));
    }
}

/// Script body applying one patch inside the prelude's scope.
pub(crate) fn patch_body(patch: &Patch) -> String {
    match patch {
        Patch::Replace { markup, .. } => {
            format!("if (root) {{ root.innerHTML = {}; }}", js_string(markup))
        }
        Patch::Prepend { key, markup } => format!(
            r#"
if (root && !item({key})) {{
  const template = document.createElement('template');
  template.innerHTML = {markup}.trim();
  const el = template.content.firstElementChild;
  if (el) {{
    el.style.opacity = '0';
    el.style.transform = 'translateY(-20px)';
    root.insertBefore(el, root.firstChild);
    setTimeout(() => {{
      el.style.transition = 'all 0.3s ease';
      el.style.opacity = '1';
      el.style.transform = 'translateY(0)';
    }}, 10);
  }}
}}"#,
            key = js_string(key),
            markup = js_string(markup)
        ),
        Patch::Truncate { keep } => format!(
            "if (root) {{ Array.from(root.querySelectorAll(':scope > [data-key]')).slice({keep}).forEach((el) => el.remove()); }}"
        ),
        Patch::SetText { key, part, text } => format!(
            "{{ const el = part({}, {}); if (el) {{ el.textContent = {}; }} }}",
            js_string(key),
            js_string(part),
            js_string(text)
        ),
        Patch::SetClass { key, part, class } => format!(
            "{{ const el = part({}, {}); if (el) {{ el.className = {}; }} }}",
            js_string(key),
            js_string(part),
            js_string(class)
        ),
        Patch::SetMarkup { key, part, markup } => format!(
            "{{ const el = part({}, {}); if (el) {{ el.innerHTML = {}; }} }}",
            js_string(key),
            js_string(part),
            js_string(markup)
        ),
        Patch::SetStyle {
            key,
            part,
            property,
            value,
        } => format!(
            "{{ const el = part({}, {}); if (el) {{ el.style.setProperty({}, {}); }} }}",
            js_string(key),
            js_string(part),
            js_string(property),
            js_string(value)
        ),
        Patch::SetAttr { key, name, value } => format!(
            "{{ const el = item({}); if (el) {{ el.setAttribute({}, {}); }} }}",
            js_string(key),
            js_string(name),
            js_string(value)
        ),
        Patch::Flash { key, effect } => format!(
            "{{ const el = item({}); if (el) {{ el.style.setProperty({}, {}); }} }}",
            js_string(key),
            js_string(effect.property),
            js_string(effect.value)
        ),
    }
}

fn revert_body(key: &str, effect: &Effect) -> String {
    format!(
        "{{ const el = item({}); if (el) {{ el.style.removeProperty({}); }} }}",
        js_string(key),
        js_string(effect.property)
    )
}

/// Mount over containers the dashboard view has rendered.
#[derive(Debug, Clone)]
pub struct EvalMount {
    rendered: Vec<&'static str>,
}

impl EvalMount {
    pub fn new(rendered: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            rendered: rendered.into_iter().collect(),
        }
    }
}

impl Mount for EvalMount {
    type Surface = EvalSurface;

    fn locate(&self, container_id: &str) -> Option<EvalSurface> {
        self.rendered
            .iter()
            .any(|id| *id == container_id)
            .then(|| EvalSurface::new(container_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_patch_escapes_payload() {
        let body = patch_body(&Patch::SetText {
            key: "payment-processing".into(),
            part: "health-metric",
            text: "</script><b>\"x\"".into(),
        });
        assert!(body.contains(r#"part("payment-processing", "health-metric")"#));
        assert!(body.contains(r#""</script><b>\"x\"""#));
    }

    #[test]
    fn truncate_keeps_leading_items() {
        let body = patch_body(&Patch::Truncate { keep: 10 });
        assert!(body.contains(".slice(10)"));
    }

    #[test]
    fn prelude_targets_container() {
        let surface = EvalSurface::new("activityListContainer");
        let script = surface.script("");
        assert!(script.contains(r#"document.getElementById("activityListContainer")"#));
    }

    #[test]
    fn mount_locates_only_rendered_containers() {
        let mount = EvalMount::new(["metricsCardsContainer"]);
        let surface = mount.locate("metricsCardsContainer").unwrap();
        assert!(surface.script("").contains(r#"getElementById("metricsCardsContainer")"#));
        assert!(mount.locate("healthStatusContainer").is_none());
    }
}
