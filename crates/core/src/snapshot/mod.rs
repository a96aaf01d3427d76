//! Versioned backup payload shared by remote sync and file export.

mod snapshot_codec;
mod snapshot_model;

pub use snapshot_codec::*;
pub use snapshot_model::*;
