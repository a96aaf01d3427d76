use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Glyph assigned to items created without an icon or photo.
pub const DEFAULT_ITEM_ICON: &str = "📦";

/// Usage count assumed for per-use items when none was recorded.
pub const DEFAULT_USAGE_COUNT: i64 = 1;

/// Fixed item categories. Unknown stored values decode as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Digital,
    Life,
    Clothes,
    Beauty,
    Furniture,
    #[default]
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Digital,
        Category::Life,
        Category::Clothes,
        Category::Beauty,
        Category::Furniture,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Digital => "digital",
            Category::Life => "life",
            Category::Clothes => "clothes",
            Category::Beauty => "beauty",
            Category::Furniture => "furniture",
            Category::Other => "other",
        }
    }

    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Digital => "Digital",
            Category::Life => "Life & Sports",
            Category::Clothes => "Clothes & Bags",
            Category::Beauty => "Skincare & Beauty",
            Category::Furniture => "Furniture & Appliances",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// View filter over categories. `All` never appears on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Which amortization rule applies to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcMethod {
    /// Price spread over the recorded number of uses.
    #[serde(alias = "by-count")]
    Count,
    /// Excluded from every cost figure.
    None,
    /// Price spread over the days the item has been owned. Unknown values land here.
    #[default]
    #[serde(alias = "by-time", other)]
    Time,
}

impl FromStr for CalcMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" | "by-time" => Ok(CalcMethod::Time),
            "count" | "by-count" => Ok(CalcMethod::Count),
            "none" => Ok(CalcMethod::None),
            _ => Err(ValidationError::UnknownCalcMethod(s.to_string())),
        }
    }
}

/// An owned item as stored locally and inside snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub icon: Option<String>,
    /// Encoded image (data URL). Shown instead of `icon` when present.
    #[serde(default)]
    pub photo: Option<String>,
    pub price: Decimal,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub retire_date: Option<NaiveDate>,
    #[serde(default)]
    pub calc_method: CalcMethod,
    #[serde(default)]
    pub usage_count: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
}

/// What to show as the item's avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemGlyph<'a> {
    Photo(&'a str),
    Icon(&'a str),
}

impl Item {
    pub fn is_retired(&self) -> bool {
        self.retire_date.is_some()
    }

    pub fn effective_usage_count(&self) -> i64 {
        self.usage_count.unwrap_or(DEFAULT_USAGE_COUNT)
    }

    pub fn glyph(&self) -> ItemGlyph<'_> {
        match self.photo.as_deref().filter(|p| !p.is_empty()) {
            Some(photo) => ItemGlyph::Photo(photo),
            None => ItemGlyph::Icon(
                self.icon
                    .as_deref()
                    .filter(|i| !i.is_empty())
                    .unwrap_or(DEFAULT_ITEM_ICON),
            ),
        }
    }
}

/// Input for creating an item. The id is assigned by the inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub category: Category,
    pub icon: Option<String>,
    pub photo: Option<String>,
    pub price: Decimal,
    pub purchase_date: NaiveDate,
    pub retire_date: Option<NaiveDate>,
    pub calc_method: CalcMethod,
    pub usage_count: Option<i64>,
    pub note: Option<String>,
}

impl NewItem {
    pub fn new(name: impl Into<String>, category: Category, price: Decimal, purchase_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            category,
            icon: None,
            photo: None,
            price,
            purchase_date,
            retire_date: None,
            calc_method: CalcMethod::default(),
            usage_count: None,
            note: None,
        }
    }

    pub(crate) fn into_item(self, id: String) -> Item {
        let icon = match (self.icon, &self.photo) {
            (Some(icon), _) if !icon.trim().is_empty() => Some(icon.trim().to_string()),
            (_, Some(_)) => None,
            _ => Some(DEFAULT_ITEM_ICON.to_string()),
        };
        Item {
            id,
            name: self.name.trim().to_string(),
            category: self.category,
            icon,
            photo: self.photo,
            price: self.price,
            purchase_date: self.purchase_date,
            retire_date: self.retire_date,
            calc_method: self.calc_method,
            usage_count: Some(self.usage_count.unwrap_or(DEFAULT_USAGE_COUNT)),
            note: self.note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        }
    }
}

/// Field-wise edit merged over an existing item. `None` leaves a field as is;
/// the nested options clear a field with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub icon: Option<String>,
    pub photo: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub retire_date: Option<Option<NaiveDate>>,
    pub calc_method: Option<CalcMethod>,
    pub usage_count: Option<i64>,
    pub note: Option<Option<String>>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ItemUpdate::default()
    }

    pub(crate) fn apply_to(self, item: &Item) -> Item {
        let mut merged = item.clone();
        if let Some(name) = self.name {
            merged.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            merged.category = category;
        }
        if let Some(icon) = self.icon {
            merged.icon = Some(icon.trim().to_string()).filter(|i| !i.is_empty());
        }
        if let Some(photo) = self.photo {
            merged.photo = photo;
        }
        if let Some(price) = self.price {
            merged.price = price;
        }
        if let Some(purchase_date) = self.purchase_date {
            merged.purchase_date = purchase_date;
        }
        if let Some(retire_date) = self.retire_date {
            merged.retire_date = retire_date;
        }
        if let Some(calc_method) = self.calc_method {
            merged.calc_method = calc_method;
        }
        if let Some(usage_count) = self.usage_count {
            merged.usage_count = Some(usage_count);
        }
        if let Some(note) = self.note {
            merged.note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn item_deserializes_from_legacy_record() {
        let json = r#"{
            "id": "lq2k8x0abc",
            "name": "Laptop",
            "category": "digital",
            "icon": "💻",
            "photo": null,
            "price": 6999.5,
            "purchaseDate": "2023-05-20",
            "retireDate": null,
            "calcMethod": "time",
            "usageCount": 1,
            "note": ""
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, Category::Digital);
        assert_eq!(item.price, dec!(6999.5));
        assert_eq!(item.purchase_date, NaiveDate::from_ymd_opt(2023, 5, 20).unwrap());
        assert_eq!(item.calc_method, CalcMethod::Time);
        assert!(!item.is_retired());
    }

    #[test]
    fn unknown_enum_values_fall_back_to_defaults() {
        let json = r#"{
            "id": "a",
            "name": "Lamp",
            "category": "garden",
            "price": 10,
            "purchaseDate": "2024-01-01",
            "calcMethod": "weekly",
            "colour": "red"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, Category::Other);
        assert_eq!(item.calc_method, CalcMethod::Time);
        assert_eq!(item.usage_count, None);
        assert_eq!(item.effective_usage_count(), 1);
    }

    #[test]
    fn calc_method_wire_names() {
        assert_eq!(serde_json::to_string(&CalcMethod::Count).unwrap(), "\"count\"");
        let parsed: CalcMethod = serde_json::from_str("\"by-count\"").unwrap();
        assert_eq!(parsed, CalcMethod::Count);
        assert_eq!(serde_json::to_string(&CalcMethod::Time).unwrap(), "\"time\"");
        for legacy in ["\"time\"", "\"by-time\"", "\"weekly\""] {
            let parsed: CalcMethod = serde_json::from_str(legacy).unwrap();
            assert_eq!(parsed, CalcMethod::Time, "{}", legacy);
        }
        assert_eq!(CalcMethod::default(), CalcMethod::Time);
        assert_eq!("none".parse::<CalcMethod>().unwrap(), CalcMethod::None);
        assert!("weekly".parse::<CalcMethod>().is_err());
    }

    #[test]
    fn category_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Beauty".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Beauty)
        );
        assert_eq!(
            "garden".parse::<CategoryFilter>(),
            Err(ValidationError::UnknownCategory("garden".to_string()))
        );
    }

    #[test]
    fn photo_takes_precedence_over_icon() {
        let mut item = NewItem::new("Camera", Category::Digital, dec!(100), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .into_item("id".to_string());
        assert_eq!(item.glyph(), ItemGlyph::Icon(DEFAULT_ITEM_ICON));

        item.photo = Some("data:image/jpeg;base64,AAAA".to_string());
        assert_eq!(item.glyph(), ItemGlyph::Photo("data:image/jpeg;base64,AAAA"));
    }

    #[test]
    fn update_clears_optional_fields() {
        let mut new_item = NewItem::new("Coat", Category::Clothes, dec!(500), NaiveDate::from_ymd_opt(2022, 10, 1).unwrap());
        new_item.retire_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        new_item.note = Some("  winter  ".to_string());
        let item = new_item.into_item("c1".to_string());
        assert_eq!(item.note.as_deref(), Some("winter"));

        let update = ItemUpdate {
            retire_date: Some(None),
            note: Some(None),
            ..Default::default()
        };
        let merged = update.apply_to(&item);
        assert_eq!(merged.id, "c1");
        assert_eq!(merged.retire_date, None);
        assert_eq!(merged.note, None);
        assert_eq!(merged.price, dec!(500));
    }
}
