use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde_json::Value;

use super::{Snapshot, SnapshotOrigin, LEGACY_SCHEMA_VERSION};
use crate::errors::{DecodeError, Result};
use crate::items::Item;

/// Builds a snapshot of the full collection and icon registry, stamped with
/// `now` under the key matching `origin`.
pub fn encode(
    items: &[Item],
    icons: &[String],
    version: &str,
    origin: SnapshotOrigin,
    now: DateTime<Utc>,
) -> Snapshot {
    let (synced_at, exported_at) = match origin {
        SnapshotOrigin::Sync => (Some(now), None),
        SnapshotOrigin::Export => (None, Some(now)),
    };
    Snapshot {
        items: items.to_vec(),
        icons: Some(icons.to_vec()),
        version: version.to_string(),
        synced_at,
        exported_at,
    }
}

/// Pretty-printed JSON as written to files and remote documents.
pub fn to_json(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parses and validates a snapshot payload.
///
/// Structure is checked strictly; individual item fields are read leniently
/// (unknown fields ignored, optional fields defaulted). Any failure rejects
/// the payload as a whole.
pub fn decode(bytes: &[u8]) -> std::result::Result<Snapshot, DecodeError> {
    let root: Value =
        serde_json::from_slice(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    let Value::Object(mut root) = root else {
        return Err(DecodeError::NotAnObject);
    };

    let raw_items = match root.remove("items") {
        None | Some(Value::Null) => return Err(DecodeError::MissingItems),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(DecodeError::ItemsNotArray),
    };

    let icons = match root.remove("icons") {
        None | Some(Value::Null) => None,
        Some(Value::Array(values)) => {
            let glyphs = values
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s),
                    _ => Err(DecodeError::InvalidIcons),
                })
                .collect::<std::result::Result<Vec<String>, DecodeError>>()?;
            if glyphs.is_empty() {
                warn!("Snapshot carries an empty icon list; keeping local icons");
                None
            } else {
                Some(glyphs)
            }
        }
        Some(_) => return Err(DecodeError::InvalidIcons),
    };

    let mut seen = HashSet::with_capacity(raw_items.len());
    let mut items = Vec::with_capacity(raw_items.len());
    for (index, raw) in raw_items.into_iter().enumerate() {
        let item: Item = serde_json::from_value(raw).map_err(|e| DecodeError::InvalidItem {
            index,
            message: e.to_string(),
        })?;
        if !seen.insert(item.id.clone()) {
            return Err(DecodeError::DuplicateItemId(item.id));
        }
        items.push(item);
    }

    let version = match root.remove("version") {
        Some(Value::String(v)) if !v.trim().is_empty() => v,
        _ => LEGACY_SCHEMA_VERSION.to_string(),
    };

    let read_time = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| root.get(*key).and_then(Value::as_str))
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
    };
    let synced_at = read_time(&["syncedAt", "timestamp"]);
    let exported_at = read_time(&["exportedAt"]);

    debug!(
        "Decoded snapshot v{} with {} items (icons: {})",
        version,
        items.len(),
        icons.as_ref().map(Vec::len).unwrap_or(0)
    );

    Ok(Snapshot {
        items,
        icons,
        version,
        synced_at,
        exported_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{CalcMethod, Category};
    use crate::snapshot::SNAPSHOT_SCHEMA_VERSION;
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal_macros::dec;

    fn items() -> Vec<Item> {
        vec![
            Item {
                id: "a1".to_string(),
                name: "Headphones".to_string(),
                category: Category::Digital,
                icon: Some("🎧".to_string()),
                photo: None,
                price: dec!(1299.99),
                purchase_date: NaiveDate::from_ymd_opt(2023, 11, 11).unwrap(),
                retire_date: None,
                calc_method: CalcMethod::Time,
                usage_count: Some(1),
                note: Some("gift".to_string()),
            },
            Item {
                id: "b2".to_string(),
                name: "Climbing pass".to_string(),
                category: Category::Life,
                icon: None,
                photo: Some("data:image/jpeg;base64,/9j/4AAQ".to_string()),
                price: dec!(300),
                purchase_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                retire_date: NaiveDate::from_ymd_opt(2024, 8, 1),
                calc_method: CalcMethod::Count,
                usage_count: Some(3),
                note: None,
            },
        ]
    }

    #[test]
    fn encoded_snapshot_decodes_to_the_same_collection() {
        let icons = vec!["🎧".to_string(), "📦".to_string()];
        let now = Utc.with_ymd_and_hms(2024, 9, 1, 8, 30, 0).unwrap();
        let snapshot = encode(&items(), &icons, SNAPSHOT_SCHEMA_VERSION, SnapshotOrigin::Sync, now);

        let json = to_json(&snapshot).unwrap();
        let decoded = decode(json.as_bytes()).unwrap();

        assert_eq!(decoded.items, items());
        assert_eq!(decoded.icons, Some(icons));
        assert_eq!(decoded.version, SNAPSHOT_SCHEMA_VERSION);
        assert_eq!(decoded.synced_at, Some(now));
        assert!(json.contains("\"syncedAt\""));
        assert!(!json.contains("\"exportedAt\""));
    }

    #[test]
    fn file_exports_are_stamped_exported_at() {
        let now = Utc.with_ymd_and_hms(2024, 9, 1, 8, 30, 0).unwrap();
        let snapshot = encode(&items(), &[], SNAPSHOT_SCHEMA_VERSION, SnapshotOrigin::Export, now);

        let json = to_json(&snapshot).unwrap();
        assert!(json.contains("\"exportedAt\""));
        assert!(!json.contains("\"syncedAt\""));

        let decoded = decode(json.as_bytes()).unwrap();
        assert_eq!(decoded.exported_at, Some(now));
        assert_eq!(decoded.synced_at, None);
        assert_eq!(decoded.timestamp(), Some(now));
    }

    #[test]
    fn accepted_prices_survive_the_round_trip() {
        let now = Utc.with_ymd_and_hms(2024, 9, 1, 8, 30, 0).unwrap();
        let mut precise = items();
        precise[0].price = dec!(98765.4321);
        precise[1].price = dec!(12345678901.25);
        for item in &precise {
            crate::items::validate_item(item).unwrap();
        }

        let json = to_json(&encode(&precise, &[], SNAPSHOT_SCHEMA_VERSION, SnapshotOrigin::Export, now)).unwrap();
        let decoded = decode(json.as_bytes()).unwrap();
        assert_eq!(decoded.items, precise);
    }

    #[test]
    fn accepts_legacy_payload_without_icons() {
        let json = r#"{
            "items": [{"id": "x", "name": "Kettle", "category": "furniture", "icon": "📦",
                       "price": 199, "purchaseDate": "2022-02-02", "calcMethod": "time"}],
            "exportedAt": "2024-01-01T10:00:00.000Z",
            "version": "1.0.0"
        }"#;
        let snapshot = decode(json.as_bytes()).unwrap();
        assert_eq!(snapshot.icons, None);
        assert_eq!(snapshot.item_count(), 1);
        assert_eq!(snapshot.version, "1.0.0");
        assert!(snapshot.exported_at.is_some());
        assert!(snapshot.timestamp().is_some());
    }

    #[test]
    fn missing_version_is_read_as_legacy() {
        let snapshot = decode(br#"{"items": []}"#).unwrap();
        assert_eq!(snapshot.version, LEGACY_SCHEMA_VERSION);
        assert_eq!(snapshot.timestamp(), None);
    }

    #[test]
    fn rejects_structurally_invalid_payloads() {
        assert!(matches!(decode(b"{not json"), Err(DecodeError::Malformed(_))));
        assert_eq!(decode(b"[1, 2]"), Err(DecodeError::NotAnObject));
        assert_eq!(decode(br#"{"version": "1.0.0"}"#), Err(DecodeError::MissingItems));
        assert_eq!(decode(br#"{"items": {"a": 1}}"#), Err(DecodeError::ItemsNotArray));
        assert_eq!(
            decode(r#"{"items": [], "icons": ["📱", 3]}"#.as_bytes()),
            Err(DecodeError::InvalidIcons)
        );
        assert_eq!(
            decode(r#"{"items": [], "icons": "📱"}"#.as_bytes()),
            Err(DecodeError::InvalidIcons)
        );
    }

    #[test]
    fn empty_icon_list_is_treated_as_absent() {
        let snapshot = decode(br#"{"items": [], "icons": []}"#).unwrap();
        assert_eq!(snapshot.icons, None);
    }

    #[test]
    fn one_unusable_item_rejects_the_whole_payload() {
        let json = br#"{"items": [
            {"id": "ok", "name": "Fine", "price": 10, "purchaseDate": "2024-01-01"},
            {"id": "bad", "name": "No date", "price": 10}
        ]}"#;
        match decode(json) {
            Err(DecodeError::InvalidItem { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = br#"{"items": [
            {"id": "same", "name": "One", "price": 1, "purchaseDate": "2024-01-01"},
            {"id": "same", "name": "Two", "price": 2, "purchaseDate": "2024-01-02"}
        ]}"#;
        assert_eq!(decode(json), Err(DecodeError::DuplicateItemId("same".to_string())));
    }
}
