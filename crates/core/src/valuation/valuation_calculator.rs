use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::{CostUnit, InventorySummary, ItemValuation};
use crate::items::{CalcMethod, Item};
use crate::utils::time_utils::{ceil_days_between, start_of_day_utc};

/// Days an item has been (or was) in service, never less than one.
///
/// Dates are taken as midnight UTC. Without a retire date the span ends at
/// `now`, so the result for active items drifts as time passes. Reversed
/// dates yield the same magnitude as ordered ones.
pub fn elapsed_days(
    purchase_date: NaiveDate,
    retire_date: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> i64 {
    let start = start_of_day_utc(purchase_date);
    let end = retire_date.map(start_of_day_utc).unwrap_or(now);
    ceil_days_between(start, end).max(1)
}

/// Amortized figure for an item, or `None` when it has none.
///
/// Per-use items return price per use; everything else is price per day.
pub fn daily_value(item: &Item, now: DateTime<Utc>) -> Option<Decimal> {
    match item.calc_method {
        CalcMethod::None => None,
        CalcMethod::Count => {
            let count = item.effective_usage_count();
            if count > 0 {
                Some(item.price / Decimal::from(count))
            } else {
                None
            }
        }
        CalcMethod::Time => {
            let days = elapsed_days(item.purchase_date, item.retire_date, now);
            Some(item.price / Decimal::from(days))
        }
    }
}

pub fn cost_unit(item: &Item) -> CostUnit {
    match item.calc_method {
        CalcMethod::Time => CostUnit::PerDay,
        CalcMethod::Count => CostUnit::PerUse,
        CalcMethod::None => CostUnit::NotCalculated,
    }
}

pub fn valuate_item(item: &Item, now: DateTime<Utc>) -> ItemValuation {
    let daily_value = daily_value(item, now);
    ItemValuation {
        item_id: item.id.clone(),
        days: elapsed_days(item.purchase_date, item.retire_date, now),
        unit: if daily_value.is_some() {
            cost_unit(item)
        } else {
            CostUnit::NotCalculated
        },
        daily_value,
        is_retired: item.is_retired(),
    }
}

/// Totals over `items`. Only per-day figures are summed into `total_daily`;
/// per-use figures are in a different unit and stay per item.
pub fn summarize<'a, I>(items: I, now: DateTime<Utc>) -> InventorySummary
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut summary = InventorySummary {
        total_count: 0,
        total_value: Decimal::ZERO,
        total_daily: Decimal::ZERO,
    };
    for item in items {
        summary.total_count += 1;
        summary.total_value = saturating_add(summary.total_value, item.price);
        if item.calc_method == CalcMethod::Time {
            if let Some(value) = daily_value(item, now) {
                summary.total_daily = saturating_add(summary.total_daily, value);
            }
        }
    }
    summary
}

/// Totals clamp at the decimal range instead of overflowing.
fn saturating_add(total: Decimal, value: Decimal) -> Decimal {
    total.checked_add(value).unwrap_or(if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Category;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(price: Decimal, method: CalcMethod, usage_count: Option<i64>) -> Item {
        Item {
            id: format!("{:?}-{}", method, price),
            name: "Thing".to_string(),
            category: Category::Other,
            icon: None,
            photo: None,
            price,
            purchase_date: date(2024, 1, 1),
            retire_date: None,
            calc_method: method,
            usage_count,
            note: None,
        }
    }

    #[test]
    fn ten_days_after_purchase_costs_a_tenth_per_day() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        let laptop = item(dec!(1200), CalcMethod::Time, None);
        assert_eq!(elapsed_days(laptop.purchase_date, None, now), 10);
        assert_eq!(daily_value(&laptop, now), Some(dec!(120)));
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let huge = item(dec!(50000000000000000000000000000), CalcMethod::Time, None);
        let items = vec![huge.clone(), huge];

        let summary = summarize(&items, now);

        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.total_value, Decimal::MAX);
        assert_eq!(summary.total_daily, Decimal::MAX);
    }

    #[test]
    fn partial_day_rounds_up() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 1).unwrap();
        assert_eq!(elapsed_days(date(2024, 1, 1), None, now), 11);
    }

    #[test]
    fn same_day_counts_as_one_day() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(elapsed_days(date(2024, 1, 1), None, now), 1);
        assert_eq!(elapsed_days(date(2024, 1, 1), Some(date(2024, 1, 1)), now), 1);
    }

    #[test]
    fn retire_date_fixes_the_end() {
        let now = Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(elapsed_days(date(2024, 1, 1), Some(date(2024, 1, 31)), now), 30);
    }

    #[test]
    fn swapped_dates_give_the_same_span() {
        let now = Utc::now();
        let pairs = [
            (date(2024, 1, 1), date(2024, 3, 15)),
            (date(2020, 2, 29), date(2021, 2, 28)),
            (date(2023, 12, 31), date(2024, 1, 1)),
        ];
        for (a, b) in pairs {
            assert_eq!(elapsed_days(a, Some(b), now), elapsed_days(b, Some(a), now));
        }
    }

    #[test]
    fn active_items_never_lose_days_as_time_advances() {
        let purchase = date(2024, 5, 10);
        let mut now = Utc.with_ymd_and_hms(2024, 5, 9, 18, 0, 0).unwrap();
        let mut previous = elapsed_days(purchase, None, now);
        assert!(previous >= 1);
        for _ in 0..200 {
            now += Duration::hours(7);
            let current = elapsed_days(purchase, None, now);
            assert!(current >= 1);
            if now >= start_of_day_utc(purchase) {
                assert!(current >= previous);
            }
            previous = current;
        }
    }

    #[test]
    fn per_use_items_are_priced_per_use() {
        let now = Utc::now();
        let pass = item(dec!(300), CalcMethod::Count, Some(3));
        assert_eq!(daily_value(&pass, now), Some(dec!(100)));
        assert_eq!(valuate_item(&pass, now).unit, CostUnit::PerUse);
    }

    #[test]
    fn daily_value_is_none_only_for_excluded_or_unused_items() {
        let now = Utc::now();
        assert_eq!(daily_value(&item(dec!(50), CalcMethod::None, None), now), None);
        assert_eq!(daily_value(&item(dec!(50), CalcMethod::Count, Some(0)), now), None);
        assert_eq!(daily_value(&item(dec!(50), CalcMethod::Count, Some(-2)), now), None);
        assert_eq!(daily_value(&item(dec!(50), CalcMethod::Count, None), now), Some(dec!(50)));
        assert!(daily_value(&item(dec!(50), CalcMethod::Time, None), now).is_some());
    }

    #[test]
    fn summary_excludes_per_use_and_excluded_items_from_daily_total() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        let items = vec![
            item(dec!(1200), CalcMethod::Time, None),
            item(dec!(300), CalcMethod::Count, Some(3)),
            item(dec!(80), CalcMethod::None, None),
        ];
        let summary = summarize(&items, now);
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.total_value, dec!(1580));
        assert_eq!(summary.total_daily, dec!(120));
    }

    #[test]
    fn valuation_marks_uncalculated_items() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        let mut gift = item(dec!(80), CalcMethod::None, None);
        gift.retire_date = Some(date(2024, 1, 6));
        let valuation = valuate_item(&gift, now);
        assert_eq!(valuation.unit, CostUnit::NotCalculated);
        assert_eq!(valuation.daily_value, None);
        assert_eq!(valuation.days, 5);
        assert!(valuation.is_retired);
    }
}
