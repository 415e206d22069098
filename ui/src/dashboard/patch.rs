//! Patch operations produced by the component diffs.
//!
//! A component never touches the display directly: it turns
//! (previous, next) snapshots into a list of [`Patch`]es and hands them to its
//! [`Surface`](super::Surface). Items inside a container are addressed by
//! their `data-key` attribute, parts of an item by a CSS class name.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    /// Replace the whole container content. `keys` lists the keyed items the
    /// markup contains, in order (empty for placeholders).
    Replace { markup: String, keys: Vec<String> },
    /// Insert one keyed item at the head, with the enter transition.
    Prepend { key: String, markup: String },
    /// Remove keyed items past the first `keep`.
    Truncate { keep: usize },
    SetText {
        key: String,
        part: &'static str,
        text: String,
    },
    /// Replace the full class list of a part (the part class included).
    SetClass {
        key: String,
        part: &'static str,
        class: String,
    },
    SetMarkup {
        key: String,
        part: &'static str,
        markup: String,
    },
    SetStyle {
        key: String,
        part: &'static str,
        property: &'static str,
        value: String,
    },
    SetAttr {
        key: String,
        name: &'static str,
        value: String,
    },
    /// Temporary inline style on the item, reverted after the effect duration.
    Flash { key: String, effect: Effect },
}

impl Patch {
    /// Key of the item the patch targets, if it targets one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Patch::Replace { .. } | Patch::Truncate { .. } => None,
            Patch::Prepend { key, .. }
            | Patch::SetText { key, .. }
            | Patch::SetClass { key, .. }
            | Patch::SetMarkup { key, .. }
            | Patch::SetStyle { key, .. }
            | Patch::SetAttr { key, .. }
            | Patch::Flash { key, .. } => Some(key),
        }
    }
}

/// Self-reverting inline style mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Effect {
    pub property: &'static str,
    pub value: &'static str,
    pub duration_ms: u64,
}

impl Effect {
    /// Card refresh highlight.
    pub const HIGHLIGHT: Effect = Effect {
        property: "animation",
        value: "highlight 1s ease",
        duration_ms: 1000,
    };
    /// Health status change.
    pub const PULSE: Effect = Effect {
        property: "animation",
        value: "pulse 0.5s ease",
        duration_ms: 500,
    };
    /// Click feedback on cards and health rows.
    pub const PRESS: Effect = Effect {
        property: "transform",
        value: "scale(0.98)",
        duration_ms: 150,
    };
    /// Click feedback on activity rows.
    pub const SELECT: Effect = Effect {
        property: "background-color",
        value: "var(--bg-tertiary)",
        duration_ms: 300,
    };
}
