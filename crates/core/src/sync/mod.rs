//! Backup and restore of the whole inventory against a remote document
//! store or a local file.
//!
//! Every transfer moves the complete collection. The remote copy is simply
//! overwritten on push and the local copy replaced on pull; the last writer
//! wins and nothing is merged.

mod remote_store;
mod sync_config_model;
mod sync_controller;

pub use remote_store::*;
pub use sync_config_model::*;
pub use sync_controller::*;
