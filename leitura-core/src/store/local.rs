//! On-device snapshot cache.
//!
//! One JSON blob per identity. This is the only store guests ever
//! touch; for authenticated users it is a mirror of the remote store
//! that can be served without waiting on the network.

use std::path::PathBuf;

use tracing::warn;

use crate::error::{LeituraError, LeituraResult};
use crate::identity::Identity;
use crate::progress::UserProgress;

#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// A store rooted at an explicit directory. Tests point this at a
    /// temp dir; the CLI uses `open_default`.
    pub fn new(dir: PathBuf) -> Self {
        LocalStore { dir }
    }

    pub fn default_dir() -> LeituraResult<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| LeituraError::LocalCache("Could not determine data directory".into()))?;
        Ok(data_dir.join("leitura"))
    }

    pub fn open_default() -> LeituraResult<Self> {
        Ok(LocalStore::new(Self::default_dir()?))
    }

    fn path_for(&self, identity: &Identity) -> PathBuf {
        self.dir.join(identity.cache_file_name())
    }

    /// Read the cached snapshot for an identity. A missing file or an
    /// unparseable blob both degrade to `None`; the caller proceeds as
    /// on first load.
    pub fn read(&self, identity: &Identity) -> Option<UserProgress> {
        let path = self.path_for(identity);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(progress) => Some(progress),
            Err(err) => {
                warn!("Discarding unparseable cache {}: {err}", path.display());
                None
            }
        }
    }

    pub fn write(&self, identity: &Identity, progress: &UserProgress) -> LeituraResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|err| {
            LeituraError::LocalCache(format!("cannot create {}: {err}", self.dir.display()))
        })?;
        let content = serde_json::to_string(progress)?;
        std::fs::write(self.path_for(identity), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn read_of_missing_identity_is_none() {
        let (_dir, store) = store();
        assert!(store.read(&Identity::new_guest()).is_none());
    }

    #[test]
    fn write_then_read_roundtrips() {
        let (_dir, store) = store();
        let identity = Identity::User("abc".to_string());
        let (progress, _) = UserProgress::default().toggle_day(3);

        store.write(&identity, &progress).unwrap();
        assert_eq!(store.read(&identity), Some(progress));
    }

    #[test]
    fn corrupt_blob_degrades_to_none() {
        let (dir, store) = store();
        let identity = Identity::Guest("g1".to_string());
        std::fs::write(dir.path().join(identity.cache_file_name()), "{not json").unwrap();
        assert!(store.read(&identity).is_none());
    }

    #[test]
    fn unusable_cache_dir_is_a_cache_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        // The store dir path is occupied by a plain file.
        let store = LocalStore::new(blocker);
        let err = store
            .write(&Identity::new_guest(), &UserProgress::default())
            .unwrap_err();
        assert!(matches!(err, LeituraError::LocalCache(_)));
    }

    #[test]
    fn identities_get_separate_blobs() {
        let (_dir, store) = store();
        let guest = Identity::Guest("x".to_string());
        let user = Identity::User("x".to_string());
        let (progress, _) = UserProgress::default().toggle_day(1);

        store.write(&guest, &progress).unwrap();
        assert!(store.read(&user).is_none());
    }
}
