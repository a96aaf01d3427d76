//! Plain-text rendering of items and totals.

use std::fmt::Write;

use rust_decimal::{Decimal, RoundingStrategy};
use valueof_core::items::{Item, ItemGlyph};
use valueof_core::valuation::{CostUnit, InventorySummary, ItemValuation};

const CURRENCY_SYMBOL: &str = "¥";

/// `¥` amount with thousands grouping and at most two decimals.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}{}.{}", sign, CURRENCY_SYMBOL, grouped, frac),
        None => format!("{}{}{}", sign, CURRENCY_SYMBOL, grouped),
    }
}

pub fn format_cost(valuation: &ItemValuation) -> String {
    match (valuation.daily_value, valuation.unit) {
        (Some(value), CostUnit::PerDay) => format!("{}/day", format_currency(value)),
        (Some(value), CostUnit::PerUse) => format!("{}/use", format_currency(value)),
        _ => "not calculated".to_string(),
    }
}

fn glyph_label(item: &Item) -> &str {
    match item.glyph() {
        ItemGlyph::Photo(_) => "🖼",
        ItemGlyph::Icon(icon) => icon,
    }
}

/// One row of `list` output.
pub fn item_line(item: &Item, valuation: &ItemValuation) -> String {
    let mut line = format!(
        "{} {}  {}  {}  {} days  {}",
        glyph_label(item),
        item.name,
        item.category.label(),
        format_currency(item.price),
        valuation.days,
        format_cost(valuation),
    );
    if valuation.is_retired {
        line.push_str("  [retired]");
    }
    let _ = write!(line, "  ({})", item.id);
    line
}

/// Multi-line view used by `show`.
pub fn item_details(item: &Item, valuation: &ItemValuation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", glyph_label(item), item.name);
    let _ = writeln!(out, "  id:        {}", item.id);
    let _ = writeln!(out, "  category:  {}", item.category.label());
    let _ = writeln!(out, "  price:     {}", format_currency(item.price));
    let _ = writeln!(out, "  purchased: {}", item.purchase_date);
    if let Some(retired) = item.retire_date {
        let _ = writeln!(out, "  retired:   {}", retired);
    }
    let _ = writeln!(out, "  method:    {:?}", item.calc_method);
    if let Some(count) = item.usage_count {
        let _ = writeln!(out, "  uses:      {}", count);
    }
    let _ = writeln!(out, "  days:      {}", valuation.days);
    let _ = writeln!(out, "  cost:      {}", format_cost(valuation));
    if item.photo.is_some() {
        let _ = writeln!(out, "  photo:     attached");
    }
    if let Some(note) = &item.note {
        let _ = writeln!(out, "  note:      {}", note);
    }
    out
}

pub fn summary_lines(label: &str, summary: &InventorySummary) -> String {
    format!(
        "{}: {} items\n  total value: {}\n  daily cost:  {}/day",
        label,
        summary.total_count,
        format_currency(summary.total_value),
        format_currency(summary.total_daily),
    )
}
