//! GitHub Gist transport for ValueOf backups.
//!
//! [`GistClient`] speaks the Gist REST API; [`GistSnapshotStore`] adapts it to
//! the core [`valueof_core::sync::RemoteSnapshotStore`] contract.

mod client;
mod error;
mod store;
mod types;

pub use client::{GistClient, DEFAULT_API_BASE_URL};
pub use error::{ApiRetryClass, GistError, Result};
pub use store::{GistSnapshotStore, GIST_DESCRIPTION};
pub use types::*;
