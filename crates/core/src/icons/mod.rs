//! Icon registry shared by all items.

mod icon_registry;

pub use icon_registry::*;
