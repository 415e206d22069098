//! Dashboard components and the coordinator that feeds them.
//!
//! Components own a container element, keep the last payload they rendered,
//! and turn new payloads into [`Patch`] lists. A [`Surface`] applies those
//! patches, either to the live document ([`EvalSurface`]) or to an in-memory
//! model ([`HeadlessSurface`]).

pub mod activity_list;
pub mod coordinator;
pub mod eval_surface;
pub mod health_status;
pub mod metrics_cards;
pub mod patch;
pub mod surface;
pub mod viz;

mod markup;

use thiserror::Error;

pub use activity_list::ActivityList;
pub use coordinator::{
    Coordinator, DashboardConfig, Host, Notification, NotificationKind, Phase,
};
pub use eval_surface::{EvalMount, EvalSurface};
pub use health_status::HealthStatus;
pub use metrics_cards::MetricsCards;
pub use patch::{Effect, Patch};
pub use surface::{HeadlessMount, HeadlessSurface, Mount, Surface};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("container #{0} not found")]
    MissingContainer(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}
