//! Dark / light / system theme selection.
//!
//! [`ThemeManager`] holds the user's preference, persists it under
//! [`STORAGE_KEY`], and broadcasts a [`ThemeChanged`] to subscribers on every
//! transition. [`use_theme_provider`] wires a manager into the Dioxus tree:
//! it applies the resolved theme to the document, follows the OS color scheme
//! while the preference is `system`, and binds the Alt+T shortcut.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::StreamExt;

use crate::core::browser;
use crate::core::storage::{KeyValueStore, LocalStore, MemoryStore};
use crate::t;

pub const STORAGE_KEY: &str = "ascend-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
    System,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Dark => "dark",
            ThemePreference::Light => "light",
            ThemePreference::System => "system",
        }
    }

    /// Unknown values fall back to dark.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "light" => ThemePreference::Light,
            "system" => ThemePreference::System,
            _ => ThemePreference::Dark,
        }
    }
}

/// The theme actually painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn other(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// `theme-color` meta value for mobile browser chrome.
    pub fn meta_color(self) -> &'static str {
        match self {
            Theme::Dark => "#121212",
            Theme::Light => "#ffffff",
        }
    }

    pub fn label(self) -> String {
        match self {
            Theme::Dark => t!("theme-dark-mode"),
            Theme::Light => t!("theme-light-mode"),
        }
    }

    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChanged {
    pub theme: Theme,
    pub preference: ThemePreference,
}

pub struct ThemeManager<S: KeyValueStore> {
    store: S,
    preference: ThemePreference,
    system: Theme,
    subscribers: Vec<UnboundedSender<ThemeChanged>>,
}

impl<S: KeyValueStore> ThemeManager<S> {
    /// Restore the persisted preference (dark when absent or unreadable).
    pub fn new(store: S, system: Theme) -> Self {
        let preference = match store.load(STORAGE_KEY) {
            Ok(Some(value)) => ThemePreference::parse(&value),
            Ok(None) => ThemePreference::default(),
            Err(err) => {
                warn!("could not read theme preference: {err}");
                ThemePreference::default()
            }
        };
        Self {
            store,
            preference,
            system,
            subscribers: Vec::new(),
        }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn system(&self) -> Theme {
        self.system
    }

    pub fn resolved(&self) -> Theme {
        match self.preference {
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Light => Theme::Light,
            ThemePreference::System => self.system,
        }
    }

    pub fn current(&self) -> ThemeChanged {
        ThemeChanged {
            theme: self.resolved(),
            preference: self.preference,
        }
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<ThemeChanged> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Dark and light alternate; `system` goes to dark.
    pub fn toggle(&mut self) -> ThemeChanged {
        let next = match self.preference {
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light | ThemePreference::System => ThemePreference::Dark,
        };
        self.transition(next)
    }

    pub fn use_system(&mut self) -> ThemeChanged {
        self.transition(ThemePreference::System)
    }

    /// Record the OS color scheme. Re-applies when following the system.
    pub fn set_system_theme(&mut self, theme: Theme) -> Option<ThemeChanged> {
        self.system = theme;
        (self.preference == ThemePreference::System).then(|| self.emit())
    }

    /// Broadcast the current state without changing it.
    pub fn apply(&mut self) -> ThemeChanged {
        self.emit()
    }

    fn transition(&mut self, preference: ThemePreference) -> ThemeChanged {
        self.preference = preference;
        if let Err(err) = self.store.save(STORAGE_KEY, preference.as_str()) {
            warn!("could not persist theme preference: {err}");
        }
        self.emit()
    }

    fn emit(&mut self) -> ThemeChanged {
        let changed = self.current();
        self.subscribers
            .retain(|subscriber| subscriber.unbounded_send(changed).is_ok());
        changed
    }
}

type SharedManager = Rc<RefCell<ThemeManager<Box<dyn KeyValueStore>>>>;

/// Theme state shared through context.
#[derive(Clone)]
pub struct ThemeHandle {
    manager: SharedManager,
    state: Signal<ThemeChanged>,
}

impl PartialEq for ThemeHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.manager, &other.manager)
    }
}

impl ThemeHandle {
    /// Reactive read of the current theme.
    pub fn state(&self) -> ThemeChanged {
        (self.state)()
    }

    pub fn toggle(&self) {
        self.manager.borrow_mut().toggle();
    }

    pub fn use_system(&self) {
        self.manager.borrow_mut().use_system();
    }

    pub fn set_system_theme(&self, theme: Theme) {
        self.manager.borrow_mut().set_system_theme(theme);
    }
}

fn open_store() -> Box<dyn KeyValueStore> {
    match LocalStore::open() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("theme preference will not persist: {err}");
            Box::new(MemoryStore::default())
        }
    }
}

/// Create the theme manager for this tree and provide a [`ThemeHandle`].
pub fn use_theme_provider() -> ThemeHandle {
    let state = use_signal(|| ThemeChanged {
        theme: Theme::Dark,
        preference: ThemePreference::Dark,
    });

    let handle = use_hook(|| {
        let mut manager = ThemeManager::new(open_store(), Theme::Dark);
        let mut changes = manager.subscribe();
        let handle = ThemeHandle {
            manager: Rc::new(RefCell::new(manager)),
            state,
        };

        let mut state = state;
        spawn(async move {
            while let Some(changed) = changes.next().await {
                browser::apply_document_theme(changed.theme.as_str(), changed.theme.meta_color());
                state.set(changed);
            }
        });

        let scheme = handle.clone();
        spawn(async move {
            browser::watch_color_scheme(move |prefers_dark| {
                scheme.set_system_theme(Theme::from_prefers_dark(prefers_dark));
            })
            .await;
        });

        let shortcut = handle.clone();
        spawn(async move {
            browser::watch_theme_shortcut(move || {
                shortcut.toggle();
                info!("Pro tip: press Alt + T to toggle themes quickly");
            })
            .await;
        });

        handle.manager.borrow_mut().apply();
        handle
    });

    use_context_provider(|| handle.clone())
}
