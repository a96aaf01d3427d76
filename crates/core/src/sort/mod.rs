//! Ordering of item collections by raw or derived fields.

mod item_sorter;

pub use item_sorter::*;
