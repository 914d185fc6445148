//! PostgREST-backed remote store.
//!
//! Talks to a Supabase-style REST API over three tables:
//! `profiles`, `daily_entries` and `user_badges`. Upserts are
//! column-limited (`Prefer: resolution=merge-duplicates` with an
//! `on_conflict` key list), so writing one field of an entry row never
//! clobbers the other. The entry conflict key is the full
//! (user_id, day_id, context_key) triple.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::error::LeituraResult;
use crate::plan::{CustomPlanConfig, PlanSelection};
use crate::progress::{UserProgress, streak_of};
use crate::store::remote::{ProfilePatch, RemoteStore};

const PROFILES: &str = "profiles";
const ENTRIES: &str = "daily_entries";
const BADGES: &str = "user_badges";

/// Context assumed for entry rows written before progress was
/// partitioned by plan.
const LEGACY_CONTEXT: &str = "whole_bible";

pub struct RestRemote {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestRemote {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        RestRemote {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn request(&self, method: Method, table: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/rest/v1/{table}", self.base_url.trim_end_matches('/'));
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn get_rows<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> LeituraResult<Vec<T>> {
        let rows = self
            .request(Method::GET, table)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(rows)
    }

    /// Column-limited upsert: only the columns present in `body` are
    /// written on conflict.
    async fn upsert(
        &self,
        table: &str,
        on_conflict: &str,
        resolution: &str,
        body: &serde_json::Value,
    ) -> LeituraResult<()> {
        self.request(Method::POST, table)
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", format!("resolution={resolution},return=minimal"))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn entry_filter(user_id: &str, day: u32, context_key: &str) -> [(&'static str, String); 3] {
        [
            ("user_id", format!("eq.{user_id}")),
            ("day_id", format!("eq.{day}")),
            ("context_key", format!("eq.{context_key}")),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProfileRow {
    pub plan_start_date: Option<NaiveDate>,
    pub selected_plan_id: Option<String>,
    pub streak: Option<u32>,
    pub custom_plan_config: Option<CustomPlanConfig>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EntryRow {
    pub day_id: u32,
    pub completed_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub context_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BadgeRow {
    pub badge_id: String,
}

/// Reconstruct a snapshot from the three collections: group entries
/// into per-context buckets, then derive the visible checklist from
/// the profile's current plan.
pub(crate) fn snapshot_from_rows(
    profile: Option<ProfileRow>,
    entries: Vec<EntryRow>,
    badges: Vec<BadgeRow>,
) -> UserProgress {
    let profile = profile.unwrap_or_default();

    let mut progress = UserProgress::default();
    progress.selection = PlanSelection::from_parts(
        profile.selected_plan_id.as_deref().unwrap_or(""),
        profile.custom_plan_config,
    );
    if let Some(start) = profile.plan_start_date {
        progress.plan_start_date = start;
    }

    for entry in entries {
        if let Some(note) = entry.note {
            progress.notes.insert(entry.day_id, note);
        }
        if entry.completed_at.is_some() {
            let context = entry
                .context_key
                .unwrap_or_else(|| LEGACY_CONTEXT.to_string());
            progress
                .all_progress
                .entry(context)
                .or_default()
                .insert(entry.day_id);
        }
    }

    progress.unlocked_badges = badges.into_iter().map(|b| b.badge_id).collect();
    progress.rederive_current_context();
    // The profile's stored streak wins when it has one; a zero falls
    // back to the recomputed value.
    if let Some(streak) = profile.streak.filter(|s| *s > 0) {
        progress.streak = streak;
    } else {
        progress.streak = streak_of(&progress.completed_ids);
    }
    progress.last_access = Some(Utc::now());
    progress
}

#[async_trait]
impl RemoteStore for RestRemote {
    async fn fetch_snapshot(&self, user_id: &str) -> LeituraResult<UserProgress> {
        let profile_query = [
            ("id", format!("eq.{user_id}")),
            (
                "select",
                "plan_start_date,selected_plan_id,streak,custom_plan_config".to_string(),
            ),
        ];
        let entries_query = [
            ("user_id", format!("eq.{user_id}")),
            ("select", "day_id,completed_at,note,context_key".to_string()),
        ];
        let badges_query = [
            ("user_id", format!("eq.{user_id}")),
            ("select", "badge_id".to_string()),
        ];

        let (profiles, entries, badges): (Vec<ProfileRow>, Vec<EntryRow>, Vec<BadgeRow>) = tokio::try_join!(
            self.get_rows(PROFILES, &profile_query),
            self.get_rows(ENTRIES, &entries_query),
            self.get_rows(BADGES, &badges_query),
        )?;

        Ok(snapshot_from_rows(
            profiles.into_iter().next(),
            entries,
            badges,
        ))
    }

    async fn write_completion(
        &self,
        user_id: &str,
        day: u32,
        context_key: &str,
        completed: bool,
    ) -> LeituraResult<()> {
        if completed {
            let body = json!([{
                "user_id": user_id,
                "day_id": day,
                "context_key": context_key,
                "completed_at": Utc::now(),
            }]);
            self.upsert(
                ENTRIES,
                "user_id,day_id,context_key",
                "merge-duplicates",
                &body,
            )
            .await
        } else {
            // Clear completion on the exact triple, leaving the note.
            self.request(Method::PATCH, ENTRIES)
                .query(&Self::entry_filter(user_id, day, context_key))
                .header("Prefer", "return=minimal")
                .json(&json!({ "completed_at": null }))
                .send()
                .await?
                .error_for_status()?;
            Ok(())
        }
    }

    async fn write_note(
        &self,
        user_id: &str,
        day: u32,
        context_key: &str,
        note: Option<&str>,
    ) -> LeituraResult<()> {
        let body = json!([{
            "user_id": user_id,
            "day_id": day,
            "context_key": context_key,
            "note": note,
        }]);
        self.upsert(
            ENTRIES,
            "user_id,day_id,context_key",
            "merge-duplicates",
            &body,
        )
        .await
    }

    async fn write_profile(&self, user_id: &str, patch: &ProfilePatch) -> LeituraResult<()> {
        let mut body = serde_json::to_value(patch)?;
        body.as_object_mut()
            .expect("a profile patch serializes to an object")
            .insert("id".to_string(), json!(user_id));
        self.upsert(PROFILES, "id", "merge-duplicates", &json!([body]))
            .await
    }

    async fn write_badges(&self, user_id: &str, badge_ids: &[String]) -> LeituraResult<()> {
        if badge_ids.is_empty() {
            return Ok(());
        }
        let rows: Vec<_> = badge_ids
            .iter()
            .map(|id| json!({ "user_id": user_id, "badge_id": id }))
            .collect();
        self.upsert(
            BADGES,
            "user_id,badge_id",
            "ignore-duplicates",
            &json!(rows),
        )
        .await
    }
}
