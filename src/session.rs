use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use leitura_core::error::{LeituraError, LeituraResult};
use leitura_core::progress::UserProgress;
use leitura_core::service::ProgressService;
use leitura_core::store::remote::{ProfilePatch, RemoteStore};
use leitura_core::store::{LocalStore, RestRemote};
use leitura_core::Identity;

use crate::config::CliConfig;

/// Everything a command needs: who the user is and a wired-up service.
pub struct Session {
    pub identity: Identity,
    pub service: ProgressService,
    pub config: CliConfig,
}

impl Session {
    pub fn open() -> Result<Self> {
        let mut config = CliConfig::load()?;

        let identity = match (&config.user_id, &config.remote) {
            (Some(user_id), Some(_)) => Identity::User(user_id.clone()),
            _ => {
                // Guest mode, with a persisted id so progress sticks
                // to this device.
                let guest_id = match &config.guest_id {
                    Some(id) => id.clone(),
                    None => {
                        let identity = Identity::new_guest();
                        config.guest_id = Some(identity.id().to_string());
                        config.save()?;
                        identity.id().to_string()
                    }
                };
                Identity::Guest(guest_id)
            }
        };

        let remote: Arc<dyn RemoteStore> = match &config.remote {
            Some(remote) => Arc::new(RestRemote::new(&remote.url, &remote.api_key)),
            None => Arc::new(OfflineRemote),
        };

        let service = ProgressService::new(LocalStore::open_default()?, remote);
        Ok(Session {
            identity,
            service,
            config,
        })
    }
}

/// Stand-in remote for configurations without a `[remote]` section.
/// Guests never reach it; if anything does, the service's degraded
/// local-only behavior applies.
struct OfflineRemote;

#[async_trait]
impl RemoteStore for OfflineRemote {
    async fn fetch_snapshot(&self, _user_id: &str) -> LeituraResult<UserProgress> {
        Err(LeituraError::Remote("no remote configured".into()))
    }

    async fn write_completion(
        &self,
        _user_id: &str,
        _day: u32,
        _context_key: &str,
        _completed: bool,
    ) -> LeituraResult<()> {
        Err(LeituraError::Remote("no remote configured".into()))
    }

    async fn write_note(
        &self,
        _user_id: &str,
        _day: u32,
        _context_key: &str,
        _note: Option<&str>,
    ) -> LeituraResult<()> {
        Err(LeituraError::Remote("no remote configured".into()))
    }

    async fn write_profile(&self, _user_id: &str, _patch: &ProfilePatch) -> LeituraResult<()> {
        Err(LeituraError::Remote("no remote configured".into()))
    }

    async fn write_badges(&self, _user_id: &str, _badge_ids: &[String]) -> LeituraResult<()> {
        Err(LeituraError::Remote("no remote configured".into()))
    }
}
