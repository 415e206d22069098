//! Offline assembler for the static Ascend Payments page.
//!
//! A base template carries `<!-- KEY -->` markers. Each marker is replaced,
//! at its first occurrence, by a component fragment, the inlined stylesheet
//! or the concatenated scripts. Component fragments carry their own inner
//! markers for the dashboard containers, filled either with loading
//! skeletons or with markup prerendered from a seeded mock snapshot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info, warn};
use ui::dashboard::{activity_list, health_status, metrics_cards};

/// Template markers and the component files bound to them, in resolution
/// order. A fragment may itself carry a marker resolved later in the list.
pub const COMPONENTS: [(&str, &str); 6] = [
    ("HEAD", "head.html"),
    ("NAVIGATION", "navigation.html"),
    ("HEADER", "header.html"),
    ("METRICS", "metrics-cards.html"),
    ("ACTIVITY", "activity-list.html"),
    ("HEALTH", "health-status.html"),
];

/// Scripts concatenated into the `SCRIPTS` marker, in load order.
pub const SCRIPTS: &[&str] = &["theme-manager.js"];

pub const CSS_MARKER: &str = "CSS";
pub const SCRIPTS_MARKER: &str = "SCRIPTS";

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the inputs live and where the page goes.
#[derive(Debug, Clone)]
pub struct Layout {
    pub src: PathBuf,
    pub out: PathBuf,
    pub styles: PathBuf,
}

impl Layout {
    pub fn template(&self) -> PathBuf {
        self.src.join("templates").join("base.html")
    }

    pub fn component(&self, file: &str) -> PathBuf {
        self.src.join("components").join(file)
    }

    pub fn script(&self, file: &str) -> PathBuf {
        self.src.join("scripts").join(file)
    }

    pub fn output(&self) -> PathBuf {
        self.out.join("index.html")
    }
}

/// What goes inside the dashboard containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Loading skeletons, as the live page shows before its first fetch.
    Skeleton,
    /// Rendered markup for one mock snapshot.
    Prerender { seed: u64, now_ms: u64 },
}

/// Outcome of a successful build.
#[derive(Debug)]
pub struct Report {
    pub output: PathBuf,
    pub bytes: usize,
    /// Markers the template did not contain.
    pub missing_markers: Vec<String>,
}

pub fn marker(key: &str) -> String {
    format!("<!-- {key} -->")
}

/// Build `<out>/index.html` from the layout.
pub fn assemble(layout: &Layout, fill: Fill) -> Result<Report, BundleError> {
    info!("building Ascend Payments dashboard");
    ui::i18n::init();

    let template = read(&layout.template())?;
    let slots = container_slots(fill);

    let mut sections = Vec::with_capacity(COMPONENTS.len() + 2);
    for (key, file) in COMPONENTS {
        let fragment = read(&layout.component(file))?;
        sections.push((key.to_string(), fill_slots(fragment, &slots)));
    }
    sections.push((CSS_MARKER.to_string(), inline_styles(&read(&layout.styles)?)));
    sections.push((SCRIPTS_MARKER.to_string(), bundle_scripts(layout)?));

    let (html, missing_markers) = substitute(template, &sections);

    fs::create_dir_all(&layout.out).map_err(|source| BundleError::Write {
        path: layout.out.clone(),
        source,
    })?;
    let output = layout.output();
    fs::write(&output, &html).map_err(|source| BundleError::Write {
        path: output.clone(),
        source,
    })?;
    info!("output written to {}", output.display());

    Ok(Report {
        output,
        bytes: html.len(),
        missing_markers,
    })
}

/// Replace each section's marker at its first occurrence. Returns the page
/// and the keys whose marker was not found.
pub fn substitute(mut html: String, sections: &[(String, String)]) -> (String, Vec<String>) {
    let mut missing = Vec::new();
    for (key, value) in sections {
        let marker = marker(key);
        match html.find(&marker) {
            Some(at) => html.replace_range(at..at + marker.len(), value),
            None => {
                warn!("template has no {marker} marker");
                missing.push(key.clone());
            }
        }
    }
    (html, missing)
}

pub fn inline_styles(css: &str) -> String {
    format!("<style>{css}</style>")
}

fn bundle_scripts(layout: &Layout) -> Result<String, BundleError> {
    let mut bundled = String::new();
    for file in SCRIPTS {
        let content = read(&layout.script(file))?;
        bundled.push_str(&format!("\n// {file}\n{content}\n"));
    }
    Ok(format!("<script>{bundled}</script>"))
}

/// Inner container markers and their contents for `fill`.
fn container_slots(fill: Fill) -> Vec<(String, String)> {
    match fill {
        Fill::Skeleton => vec![
            ("METRICS_CARDS".to_string(), metrics_cards::loading_markup()),
            ("ACTIVITY_ITEMS".to_string(), activity_list::loading_markup()),
            ("HEALTH_ITEMS".to_string(), health_status::loading_markup()),
        ],
        Fill::Prerender { seed, now_ms } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let metrics = api::mock::metrics(&mut rng);
            let activities = api::mock::activities(&mut rng, now_ms);
            let health = api::mock::health(&mut rng);
            let shown = activities.len().min(activity_list::MAX_ACTIVITIES);
            debug!(seed, activities = shown, services = health.len(), "prerendering snapshot");
            vec![
                ("METRICS_CARDS".to_string(), metrics_cards::cards_markup(&metrics)),
                (
                    "ACTIVITY_ITEMS".to_string(),
                    activity_list::items_markup(&activities[..shown]),
                ),
                ("HEALTH_ITEMS".to_string(), health_status::rows_markup(&health)),
            ]
        }
    }
}

fn fill_slots(fragment: String, slots: &[(String, String)]) -> String {
    slots.iter().fold(fragment, |html, (key, value)| {
        html.replacen(&marker(key), value, 1)
    })
}

fn read(path: &Path) -> Result<String, BundleError> {
    fs::read_to_string(path).map_err(|source| BundleError::Read {
        path: path.to_path_buf(),
        source,
    })
}
