//! Progress engine for the leitura ecosystem.
//!
//! This crate provides everything below the UI for a local-first reading
//! plan tracker:
//! - `plan` / `content` for plan selection and daily reading math
//! - `bible` for fetching the verse text of a reading
//! - `progress` for the `UserProgress` snapshot and its pure transforms
//! - `store` for the local cache and the remote store adapter
//! - `service` for the orchestrator that keeps both in sync

pub mod badge;
pub mod bible;
pub mod content;
pub mod error;
pub mod identity;
pub mod plan;
pub mod progress;
pub mod service;
pub mod store;

pub use error::{LeituraError, LeituraResult};
pub use identity::Identity;
pub use plan::{CustomPlanConfig, PlanSelection};
pub use progress::UserProgress;
