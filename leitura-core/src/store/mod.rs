//! Persistence: the synchronous local cache and the remote store
//! adapter it is reconciled against.

pub mod local;
pub mod remote;
pub mod rest;

pub use local::LocalStore;
pub use remote::{ProfilePatch, RemoteStore};
pub use rest::RestRemote;
