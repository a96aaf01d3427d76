use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{CalcMethod, CategoryFilter, Item, ItemUpdate, NewItem};
use crate::errors::ValidationError;
use crate::icons::IconRegistry;
use crate::sort::{sort_items, SortSpec};
use crate::valuation::{summarize, InventorySummary};

/// Checks the invariants every stored item must satisfy after create or edit.
pub fn validate_item(item: &Item) -> Result<(), ValidationError> {
    if item.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if item.price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice(item.price.to_string()));
    }
    if !survives_float_encoding(item.price) {
        return Err(ValidationError::UnrepresentablePrice(item.price.to_string()));
    }
    if item.calc_method == CalcMethod::Count {
        let count = item.effective_usage_count();
        if count < 1 {
            return Err(ValidationError::InvalidUsageCount(count));
        }
    }
    Ok(())
}

/// Whether `price` reads back unchanged after being written as a JSON float.
pub fn survives_float_encoding(price: Decimal) -> bool {
    price
        .to_f64()
        .and_then(|value| Decimal::from_str(&value.to_string()).ok())
        .is_some_and(|decoded| decoded == price)
}

/// The application's owned item collection and icon registry.
///
/// Items are kept in insertion order with the newest first. Every mutating
/// method either applies completely or leaves the inventory unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    items: Vec<Item>,
    icons: IconRegistry,
}

impl Inventory {
    pub fn new(items: Vec<Item>, icons: IconRegistry) -> Self {
        Self { items, icons }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn icons(&self) -> &IconRegistry {
        &self.icons
    }

    pub fn icons_mut(&mut self) -> &mut IconRegistry {
        &mut self.icons
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Validates and prepends a new item with a fresh id.
    pub fn add_item(&mut self, new_item: NewItem) -> Result<&Item, ValidationError> {
        let item = new_item.into_item(Uuid::now_v7().to_string());
        validate_item(&item)?;
        debug!("Adding item {} ({})", item.id, item.name);
        self.items.insert(0, item);
        Ok(&self.items[0])
    }

    /// Merges `update` over the item with `id`, keeping its id and position.
    pub fn update_item(&mut self, id: &str, update: ItemUpdate) -> Result<&Item, ValidationError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| ValidationError::ItemNotFound(id.to_string()))?;

        let merged = update.apply_to(&self.items[index]);
        validate_item(&merged)?;
        debug!("Updating item {}", id);
        self.items[index] = merged;
        Ok(&self.items[index])
    }

    pub fn delete_item(&mut self, id: &str) -> Result<Item, ValidationError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| ValidationError::ItemNotFound(id.to_string()))?;
        debug!("Deleting item {}", id);
        Ok(self.items.remove(index))
    }

    pub fn filtered(&self, filter: CategoryFilter) -> Vec<&Item> {
        self.items.iter().filter(|item| filter.matches(item)).collect()
    }

    /// Filtered and sorted copy of the collection for display.
    pub fn view(&self, filter: CategoryFilter, sort: SortSpec, now: DateTime<Utc>) -> Vec<Item> {
        let filtered: Vec<Item> = self.filtered(filter).into_iter().cloned().collect();
        sort_items(&filtered, sort, now)
    }

    pub fn summary(&self, filter: CategoryFilter, now: DateTime<Utc>) -> InventorySummary {
        summarize(self.filtered(filter), now)
    }

    /// Replaces the whole collection, and the icon registry when `icons` is given.
    pub fn replace_all(&mut self, items: Vec<Item>, icons: Option<Vec<String>>) {
        debug!(
            "Replacing inventory: {} items, icons replaced: {}",
            items.len(),
            icons.is_some()
        );
        self.items = items;
        if let Some(icons) = icons {
            self.icons = IconRegistry::from_glyphs(icons);
        }
    }
}
