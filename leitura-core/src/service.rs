//! The progress orchestrator.
//!
//! Local-first policy: every read and write is served from the local
//! cache synchronously; the remote store is reconciled in the
//! background and never blocks a caller. The one exception is the
//! first load of an authenticated user on a fresh device, where there
//! is nothing local to show and the remote fetch is awaited in full.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::time::timeout;
use tracing::{debug, error, warn};

use crate::error::{LeituraError, LeituraResult};
use crate::identity::Identity;
use crate::plan::PlanSelection;
use crate::progress::UserProgress;
use crate::store::local::LocalStore;
use crate::store::remote::{ProfilePatch, RemoteStore};

/// How long a load waits for the remote before serving the cache.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(3);

pub struct ProgressService {
    local: LocalStore,
    remote: Arc<dyn RemoteStore>,
    remote_timeout: Duration,
}

impl ProgressService {
    pub fn new(local: LocalStore, remote: Arc<dyn RemoteStore>) -> Self {
        Self::with_timeout(local, remote, DEFAULT_REMOTE_TIMEOUT)
    }

    pub fn with_timeout(
        local: LocalStore,
        remote: Arc<dyn RemoteStore>,
        remote_timeout: Duration,
    ) -> Self {
        ProgressService {
            local,
            remote,
            remote_timeout,
        }
    }

    /// Load the best-available snapshot for an identity. Never fails:
    /// remote trouble degrades to the cache, and an empty slate
    /// degrades to the default snapshot.
    pub async fn load(&self, identity: &Identity) -> UserProgress {
        if identity.is_guest() {
            return self.local.read(identity).unwrap_or_default();
        }

        let user_id = identity.id().to_string();
        match self.local.read(identity) {
            None => {
                // First load on this device: nothing to show yet, so
                // wait for the remote without a timeout.
                match self.remote.fetch_snapshot(&user_id).await {
                    Ok(snapshot) => {
                        self.persist_local(identity, &snapshot);
                        snapshot
                    }
                    Err(err) => {
                        error!("Initial remote fetch failed for {identity}: {err}");
                        UserProgress::default()
                    }
                }
            }
            Some(local_snapshot) => match self.bounded_fetch(&user_id).await {
                Ok(snapshot) => {
                    self.persist_local(identity, &snapshot);
                    snapshot
                }
                Err(err) => {
                    warn!("Remote fetch failed for {identity}, serving cache: {err}");
                    self.spawn_cache_refresh(identity.clone());
                    local_snapshot
                }
            },
        }
    }

    /// Fetch the remote snapshot, bounded by the configured timeout.
    /// An elapsed bound cancels the in-flight request.
    async fn bounded_fetch(&self, user_id: &str) -> LeituraResult<UserProgress> {
        match timeout(self.remote_timeout, self.remote.fetch_snapshot(user_id)).await {
            Ok(result) => result,
            Err(_) => Err(LeituraError::RemoteTimeout(self.remote_timeout.as_secs())),
        }
    }

    /// Toggle one day's completion. The new snapshot is cached and
    /// returned immediately; completion, streak and badge writes go to
    /// the remote in the background.
    pub async fn toggle_day(
        &self,
        current: &UserProgress,
        day: u32,
        identity: &Identity,
    ) -> UserProgress {
        let (next, outcome) = current.toggle_day(day);
        self.persist_local(identity, &next);

        if let Identity::User(user_id) = identity {
            let remote = Arc::clone(&self.remote);
            let user_id = user_id.clone();
            self.spawn_remote("completion", async move {
                remote
                    .write_completion(&user_id, day, &outcome.context_key, outcome.completed)
                    .await?;
                remote
                    .write_profile(
                        &user_id,
                        &ProfilePatch {
                            streak: Some(outcome.streak),
                            ..Default::default()
                        },
                    )
                    .await?;
                remote.write_badges(&user_id, &outcome.newly_unlocked).await
            });
        }
        next
    }

    pub async fn save_note(
        &self,
        current: &UserProgress,
        day: u32,
        text: &str,
        identity: &Identity,
    ) -> UserProgress {
        let next = current.with_note(day, text);
        self.persist_local(identity, &next);

        if let Identity::User(user_id) = identity {
            let remote = Arc::clone(&self.remote);
            let user_id = user_id.clone();
            let context_key = next.context_key();
            let text = text.to_string();
            self.spawn_remote("note", async move {
                remote
                    .write_note(&user_id, day, &context_key, Some(&text))
                    .await
            });
        }
        next
    }

    pub async fn delete_note(
        &self,
        current: &UserProgress,
        day: u32,
        identity: &Identity,
    ) -> UserProgress {
        let next = current.without_note(day);
        self.persist_local(identity, &next);

        if let Identity::User(user_id) = identity {
            let remote = Arc::clone(&self.remote);
            let user_id = user_id.clone();
            let context_key = next.context_key();
            self.spawn_remote("note removal", async move {
                remote.write_note(&user_id, day, &context_key, None).await
            });
        }
        next
    }

    pub async fn update_start_date(
        &self,
        current: &UserProgress,
        date: NaiveDate,
        identity: &Identity,
    ) -> UserProgress {
        let next = current.with_start_date(date);
        self.persist_local(identity, &next);

        if let Identity::User(user_id) = identity {
            let remote = Arc::clone(&self.remote);
            let user_id = user_id.clone();
            self.spawn_remote("start date", async move {
                remote
                    .write_profile(
                        &user_id,
                        &ProfilePatch {
                            plan_start_date: Some(date),
                            ..Default::default()
                        },
                    )
                    .await
            });
        }
        next
    }

    /// Change the active plan (catalog plan or custom book/duration).
    /// The visible checklist swaps to the new context's bucket.
    pub async fn update_selection(
        &self,
        current: &UserProgress,
        selection: PlanSelection,
        identity: &Identity,
    ) -> UserProgress {
        let next = current.with_selection(selection);
        self.persist_local(identity, &next);

        if let Identity::User(user_id) = identity {
            let remote = Arc::clone(&self.remote);
            let user_id = user_id.clone();
            let patch = ProfilePatch {
                selected_plan_id: Some(next.selection.plan_id().to_string()),
                custom_plan_config: next.selection.custom_config().cloned(),
                ..Default::default()
            };
            self.spawn_remote("plan selection", async move {
                remote.write_profile(&user_id, &patch).await
            });
        }
        next
    }

    /// Cache writes must never surface to the caller; the in-memory
    /// snapshot stays the source of truth for this session.
    fn persist_local(&self, identity: &Identity, progress: &UserProgress) {
        if let Err(err) = self.local.write(identity, progress) {
            error!("Failed to write local cache for {identity}: {err}");
        }
    }

    /// Refresh the cache from the remote without anybody waiting on
    /// it. Used after a load that had to fall back to the cache.
    fn spawn_cache_refresh(&self, identity: Identity) {
        let remote = Arc::clone(&self.remote);
        let local = self.local.clone();
        tokio::spawn(async move {
            match remote.fetch_snapshot(identity.id()).await {
                Ok(snapshot) => {
                    if let Err(err) = local.write(&identity, &snapshot) {
                        error!("Background cache refresh write failed for {identity}: {err}");
                    }
                }
                Err(err) => debug!("Background cache refresh failed for {identity}: {err}"),
            }
        });
    }

    /// Fire-and-forget remote write. Failures are logged and dropped;
    /// they never re-enter caller state.
    fn spawn_remote<F>(&self, what: &'static str, fut: F)
    where
        F: Future<Output = crate::error::LeituraResult<()>> + Send + 'static,
    {
        tokio::spawn(async move {
            if let Err(err) = fut.await {
                error!("Background {what} sync failed: {err}");
            }
        });
    }
}
