use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use bundler::{assemble, Fill, Layout};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ascend-bundler",
    about = "Assemble the static Ascend Payments dashboard page",
    version
)]
struct Cli {
    /// Directory holding templates/, components/ and scripts/.
    #[arg(long, value_name = "DIR", default_value = "site")]
    src: PathBuf,

    /// Output directory; index.html is written here.
    #[arg(long, value_name = "DIR", default_value = "dist")]
    out: PathBuf,

    /// Stylesheet inlined into the page.
    #[arg(long, value_name = "FILE", default_value = "ui/assets/theme/main.css")]
    styles: PathBuf,

    /// Leave loading skeletons in the dashboard containers instead of a
    /// rendered mock snapshot. Only useful when a host injects data later.
    #[arg(long)]
    skeleton: bool,

    /// Seed for the prerendered snapshot.
    #[arg(long, value_name = "SEED", default_value_t = 2024)]
    seed: u64,
}

impl Cli {
    fn layout(&self) -> Layout {
        Layout {
            src: self.src.clone(),
            out: self.out.clone(),
            styles: self.styles.clone(),
        }
    }

    fn fill(&self, now_ms: u64) -> Fill {
        if self.skeleton {
            Fill::Skeleton
        } else {
            Fill::Prerender {
                seed: self.seed,
                now_ms,
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let fill = cli.fill(now_ms());
    if fill == Fill::Skeleton {
        warn!("skeleton build: the page shows loading placeholders until a host fills the containers");
    }

    match assemble(&cli.layout(), fill) {
        Ok(report) => {
            if !report.missing_markers.is_empty() {
                warn!(
                    "{} marker(s) left unfilled: {}",
                    report.missing_markers.len(),
                    report.missing_markers.join(", ")
                );
            }
            info!("build completed ({} bytes)", report.bytes);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("build failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use std::fs;
    use std::path::Path;

    use super::*;

    const NOW: u64 = 1_700_000_000_000;

    fn workspace() -> &'static Path {
        Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/.."))
    }

    #[test]
    fn default_build_prerenders_a_snapshot() {
        let cli = Cli::parse_from(["ascend-bundler"]);
        assert_eq!(cli.fill(NOW), Fill::Prerender { seed: 2024, now_ms: NOW });
    }

    #[test]
    fn skeleton_is_opt_in() {
        let cli = Cli::parse_from(["ascend-bundler", "--skeleton"]);
        assert_eq!(cli.fill(NOW), Fill::Skeleton);
    }

    #[test]
    fn default_output_has_keyed_items() {
        let out = tempfile::TempDir::new().unwrap();
        let root = workspace();
        let site = root.join("site");
        let styles = root.join("ui/assets/theme/main.css");
        let cli = Cli::parse_from([
            OsStr::new("ascend-bundler"),
            OsStr::new("--src"),
            site.as_os_str(),
            OsStr::new("--styles"),
            styles.as_os_str(),
            OsStr::new("--out"),
            out.path().as_os_str(),
        ]);

        let report = assemble(&cli.layout(), cli.fill(NOW)).unwrap();
        let html = fs::read_to_string(report.output).unwrap();
        assert!(!html.contains("class=\"skeleton-loader"));
        for key in ["revenue", "clients", "payment-processing"] {
            assert!(html.contains(&format!("data-key=\"{key}\"")), "missing item {key}");
        }
    }
}
