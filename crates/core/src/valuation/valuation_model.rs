use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit of an item's amortized figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostUnit {
    PerDay,
    PerUse,
    /// The item is excluded from amortization.
    NotCalculated,
}

/// Derived figures for one item, recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemValuation {
    pub item_id: String,
    pub days: i64,
    pub daily_value: Option<Decimal>,
    pub unit: CostUnit,
    pub is_retired: bool,
}

/// Aggregate figures over a filtered collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_count: usize,
    pub total_value: Decimal,
    /// Sum of per-day figures. Per-use items never contribute.
    pub total_daily: Decimal,
}
