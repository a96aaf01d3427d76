use std::path::Path;

use anyhow::{bail, Context};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use chrono::{DateTime, Utc};
use valueof_core::items::{CategoryFilter, ItemUpdate, NewItem};
use valueof_core::sort::{SortField, SortOrder, SortSpec};
use valueof_core::valuation::valuate_item;

use super::with_notice;
use crate::cli::{AddArgs, EditArgs};
use crate::context::AppContext;
use crate::format::{item_details, item_line, summary_lines};

fn image_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Reads an image file into a `data:` URL.
pub(super) async fn photo_data_url(path: &Path) -> anyhow::Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read photo {}", path.display()))?;
    Ok(format!(
        "data:{};base64,{}",
        image_mime_type(path),
        BASE64_STANDARD.encode(bytes)
    ))
}

pub async fn add(ctx: &mut AppContext, args: AddArgs, now: DateTime<Utc>) -> anyhow::Result<String> {
    let photo = match &args.photo {
        Some(path) => Some(photo_data_url(path).await?),
        None => None,
    };

    let mut new_item = NewItem::new(
        args.name,
        args.category,
        args.price,
        args.date.unwrap_or_else(|| now.date_naive()),
    );
    // Without a photo the picker's first icon is preselected.
    new_item.icon = match (args.icon, &photo) {
        (Some(icon), _) => Some(icon),
        (None, None) => Some(ctx.inventory.icons().first().to_string()),
        (None, Some(_)) => None,
    };
    new_item.photo = photo;
    new_item.retire_date = args.retire_date;
    new_item.calc_method = args.method;
    new_item.usage_count = args.uses;
    new_item.note = args.note;

    let item = ctx.inventory.add_item(new_item)?;
    let message = format!("Added {} ({})", item.name, item.id);
    Ok(with_notice(message, ctx.save()))
}

pub async fn edit(ctx: &mut AppContext, id: &str, fields: EditArgs) -> anyhow::Result<String> {
    let photo = match &fields.photo {
        Some(path) => Some(Some(photo_data_url(path).await?)),
        None if fields.clear_photo => Some(None),
        None => None,
    };

    let update = ItemUpdate {
        name: fields.name,
        category: fields.category,
        icon: fields.icon,
        photo,
        price: fields.price,
        purchase_date: fields.date,
        retire_date: match fields.retire_date {
            Some(date) => Some(Some(date)),
            None if fields.clear_retire_date => Some(None),
            None => None,
        },
        calc_method: fields.method,
        usage_count: fields.uses,
        note: match fields.note {
            Some(note) => Some(Some(note)),
            None if fields.clear_note => Some(None),
            None => None,
        },
    };
    if update.is_empty() {
        bail!("Nothing to change; pass at least one field to edit");
    }

    let item = ctx.inventory.update_item(id, update)?;
    let message = format!("Updated {} ({})", item.name, item.id);
    Ok(with_notice(message, ctx.save()))
}

pub fn delete(ctx: &mut AppContext, id: &str) -> anyhow::Result<String> {
    let removed = ctx.inventory.delete_item(id)?;
    Ok(with_notice(format!("Deleted {}", removed.name), ctx.save()))
}

pub fn list(
    ctx: &AppContext,
    filter: CategoryFilter,
    field: SortField,
    order: SortOrder,
    now: DateTime<Utc>,
) -> String {
    let items = ctx.inventory.view(filter, SortSpec { field, order }, now);
    if items.is_empty() {
        return format!("No items ({})", filter.label());
    }
    items
        .iter()
        .map(|item| item_line(item, &valuate_item(item, now)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn show(ctx: &AppContext, id: &str, now: DateTime<Utc>) -> anyhow::Result<String> {
    let Some(item) = ctx.inventory.get_item(id) else {
        bail!("Item not found: {}", id);
    };
    Ok(item_details(item, &valuate_item(item, now)))
}

pub fn summary(ctx: &AppContext, filter: CategoryFilter, now: DateTime<Utc>) -> String {
    summary_lines(filter.label(), &ctx.inventory.summary(filter, now))
}
