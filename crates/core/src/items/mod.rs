//! Item model and the in-memory inventory that owns it.

mod inventory;
mod items_model;

pub use inventory::*;
pub use items_model::*;
