use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::items::Item;
use crate::utils::time_utils::start_of_day_utc;
use crate::valuation::{daily_value, elapsed_days};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    PurchaseDate,
    Price,
    Days,
    UsageCount,
    Daily,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::PurchaseDate => "purchaseDate",
            SortField::Price => "price",
            SortField::Days => "days",
            SortField::UsageCount => "usageCount",
            SortField::Daily => "daily",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "purchaseDate" | "purchase-date" | "purchase_date" => Ok(SortField::PurchaseDate),
            "price" => Ok(SortField::Price),
            "days" => Ok(SortField::Days),
            "usageCount" | "usage-count" | "usage_count" => Ok(SortField::UsageCount),
            "daily" => Ok(SortField::Daily),
            other => Err(ValidationError::UnknownSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(ValidationError::UnknownSortOrder(s.to_string())),
        }
    }
}

/// Field and direction of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortSpec {
    /// Newest purchases first.
    fn default() -> Self {
        Self {
            field: SortField::PurchaseDate,
            order: SortOrder::Desc,
        }
    }
}

/// Comparable key. `Unbounded` is above every value, so items without a
/// daily figure sink to the end ascending and rise to the top descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Value(Decimal),
    Unbounded,
}

pub fn sort_key(item: &Item, field: SortField, now: DateTime<Utc>) -> SortKey {
    match field {
        SortField::PurchaseDate => SortKey::Value(Decimal::from(
            start_of_day_utc(item.purchase_date).timestamp_millis(),
        )),
        SortField::Price => SortKey::Value(item.price),
        SortField::Days => SortKey::Value(Decimal::from(elapsed_days(
            item.purchase_date,
            item.retire_date,
            now,
        ))),
        SortField::UsageCount => SortKey::Value(Decimal::from(item.usage_count.unwrap_or(0))),
        SortField::Daily => daily_value(item, now)
            .map(SortKey::Value)
            .unwrap_or(SortKey::Unbounded),
    }
}

/// Returns a sorted copy of `items`; the input is left untouched.
///
/// Keys are computed once per item at `now`. Order among equal keys is
/// unspecified.
pub fn sort_items(items: &[Item], spec: SortSpec, now: DateTime<Utc>) -> Vec<Item> {
    let mut keyed: Vec<(SortKey, &Item)> = items
        .iter()
        .map(|item| (sort_key(item, spec.field, now), item))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering: Ordering = a.cmp(b);
        match spec.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(_, item)| item.clone()).collect()
}
