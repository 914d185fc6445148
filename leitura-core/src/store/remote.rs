//! The contract the sync engine expects from the remote store.
//!
//! The remote is a relational backend with three collections: profile
//! settings, per-day entries tagged with a context key, and unlocked
//! badges. Entries are unique per (user, day, context); the adapter
//! must update completion and note fields independently so one never
//! clobbers the other.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::LeituraResult;
use crate::plan::CustomPlanConfig;
use crate::progress::UserProgress;

/// Partial profile upsert. Only set fields are written; the profile
/// row is created if it does not exist yet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_plan_config: Option<CustomPlanConfig>,
}

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Join profile + entries (all contexts) + badges into a snapshot,
    /// with `completed_ids` derived from the profile's current plan.
    async fn fetch_snapshot(&self, user_id: &str) -> LeituraResult<UserProgress>;

    /// Set or clear `completed_at` for the exact (user, day, context)
    /// triple, preserving any note on the row.
    async fn write_completion(
        &self,
        user_id: &str,
        day: u32,
        context_key: &str,
        completed: bool,
    ) -> LeituraResult<()>;

    /// Set (`Some`) or clear (`None`) the note on a row, preserving
    /// its completion state.
    async fn write_note(
        &self,
        user_id: &str,
        day: u32,
        context_key: &str,
        note: Option<&str>,
    ) -> LeituraResult<()>;

    async fn write_profile(&self, user_id: &str, patch: &ProfilePatch) -> LeituraResult<()>;

    /// Duplicate-safe insert of unlocked badges.
    async fn write_badges(&self, user_id: &str, badge_ids: &[String]) -> LeituraResult<()>;
}
