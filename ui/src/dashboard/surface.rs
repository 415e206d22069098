//! Rendering surfaces: where component patches land.

use std::collections::BTreeMap;

use super::patch::{Effect, Patch};

/// One component container on screen.
pub trait Surface {
    fn apply(&mut self, patch: Patch);

    fn apply_all(&mut self, patches: Vec<Patch>) {
        for patch in patches {
            self.apply(patch);
        }
    }
}

/// Resolves container ids to surfaces.
pub trait Mount {
    type Surface: Surface;

    fn locate(&self, container_id: &str) -> Option<Self::Surface>;
}

/// In-memory surface that keeps an item model and a patch log, so component
/// behaviour can be checked without a display.
#[derive(Debug, Default, Clone)]
pub struct HeadlessSurface {
    markup: String,
    items: Vec<HeadlessItem>,
    log: Vec<Patch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessItem {
    pub key: String,
    /// Markup the item was inserted with; empty for items created by `Replace`.
    pub markup: String,
    pub entered: bool,
    pub attrs: BTreeMap<String, String>,
    pub parts: BTreeMap<String, PartState>,
    pub flashes: Vec<Effect>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartState {
    pub text: Option<String>,
    pub class: Option<String>,
    pub markup: Option<String>,
    pub style: BTreeMap<String, String>,
}

impl HeadlessItem {
    fn new(key: String, markup: String, entered: bool) -> Self {
        Self {
            key,
            markup,
            entered,
            attrs: BTreeMap::new(),
            parts: BTreeMap::new(),
            flashes: Vec::new(),
        }
    }

    pub fn part(&self, name: &str) -> Option<&PartState> {
        self.parts.get(name)
    }
}

impl HeadlessSurface {
    /// Markup of the last full replace.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn keys(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.key.as_str()).collect()
    }

    pub fn item(&self, key: &str) -> Option<&HeadlessItem> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn patches(&self) -> &[Patch] {
        &self.log
    }

    fn item_mut(&mut self, key: &str) -> Option<&mut HeadlessItem> {
        self.items.iter_mut().find(|item| item.key == key)
    }

    fn part_mut(&mut self, key: &str, part: &str) -> Option<&mut PartState> {
        self.item_mut(key)
            .map(|item| item.parts.entry(part.to_string()).or_default())
    }
}

impl Surface for HeadlessSurface {
    fn apply(&mut self, patch: Patch) {
        match &patch {
            Patch::Replace { markup, keys } => {
                self.markup = markup.clone();
                self.items = keys
                    .iter()
                    .map(|key| HeadlessItem::new(key.clone(), String::new(), false))
                    .collect();
            }
            Patch::Prepend { key, markup } => {
                self.items
                    .insert(0, HeadlessItem::new(key.clone(), markup.clone(), true));
            }
            Patch::Truncate { keep } => self.items.truncate(*keep),
            Patch::SetText { key, part, text } => {
                if let Some(state) = self.part_mut(key, part) {
                    state.text = Some(text.clone());
                }
            }
            Patch::SetClass { key, part, class } => {
                if let Some(state) = self.part_mut(key, part) {
                    state.class = Some(class.clone());
                }
            }
            Patch::SetMarkup { key, part, markup } => {
                if let Some(state) = self.part_mut(key, part) {
                    state.markup = Some(markup.clone());
                }
            }
            Patch::SetStyle {
                key,
                part,
                property,
                value,
            } => {
                if let Some(state) = self.part_mut(key, part) {
                    state.style.insert((*property).to_string(), value.clone());
                }
            }
            Patch::SetAttr { key, name, value } => {
                if let Some(item) = self.item_mut(key) {
                    item.attrs.insert((*name).to_string(), value.clone());
                }
            }
            Patch::Flash { key, effect } => {
                if let Some(item) = self.item_mut(key) {
                    item.flashes.push(*effect);
                }
            }
        }
        self.log.push(patch);
    }
}

/// Mount over a fixed set of container ids, handing out fresh headless
/// surfaces.
#[derive(Debug, Clone, Default)]
pub struct HeadlessMount {
    containers: Vec<String>,
}

impl HeadlessMount {
    pub fn new<I, T>(containers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            containers: containers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Mount for HeadlessMount {
    type Surface = HeadlessSurface;

    fn locate(&self, container_id: &str) -> Option<HeadlessSurface> {
        self.containers
            .iter()
            .any(|id| id == container_id)
            .then(HeadlessSurface::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patches_on_unknown_items_are_logged_but_ignored() {
        let mut surface = HeadlessSurface::default();
        surface.apply(Patch::Replace {
            markup: "<div></div>".into(),
            keys: vec!["a".into()],
        });
        surface.apply(Patch::SetText {
            key: "missing".into(),
            part: "label",
            text: "x".into(),
        });
        assert_eq!(surface.keys(), vec!["a"]);
        assert!(surface.item("a").unwrap().parts.is_empty());
        assert_eq!(surface.patches().len(), 2);
    }

    #[test]
    fn prepend_and_truncate_keep_order() {
        let mut surface = HeadlessSurface::default();
        surface.apply(Patch::Replace {
            markup: String::new(),
            keys: vec!["2".into(), "1".into()],
        });
        surface.apply(Patch::Prepend {
            key: "3".into(),
            markup: "<li>3</li>".into(),
        });
        surface.apply(Patch::Truncate { keep: 2 });
        assert_eq!(surface.keys(), vec!["3", "2"]);
        assert!(surface.item("3").unwrap().entered);
    }

    #[test]
    fn mount_only_knows_declared_containers() {
        let mount = HeadlessMount::new(["healthStatusContainer"]);
        assert!(mount.locate("healthStatusContainer").is_some());
        assert!(mount.locate("activityListContainer").is_none());
    }
}
