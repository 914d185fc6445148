//! User identities.
//!
//! A guest identity is generated on-device and only ever touches the
//! local cache. An authenticated identity mirrors a remote account and
//! gets a cached snapshot locally plus background sync.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identity {
    Guest(String),
    User(String),
}

impl Identity {
    /// Generate a fresh guest identity.
    pub fn new_guest() -> Self {
        Identity::Guest(uuid::Uuid::new_v4().to_string())
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest(_))
    }

    pub fn id(&self) -> &str {
        match self {
            Identity::Guest(id) | Identity::User(id) => id,
        }
    }

    /// File name for this identity's cached snapshot blob.
    pub fn cache_file_name(&self) -> String {
        match self {
            Identity::Guest(id) => format!("guest_{id}.json"),
            Identity::User(id) => format!("user_{id}.json"),
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identity::Guest(id) => write!(f, "guest:{id}"),
            Identity::User(id) => write!(f, "user:{id}"),
        }
    }
}
