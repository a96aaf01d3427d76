//! Amortization of item prices into cost-per-day and cost-per-use figures.

mod valuation_calculator;
mod valuation_model;

pub use valuation_calculator::*;
pub use valuation_model::*;
