use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Milliseconds in one calendar day.
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Midnight UTC at the start of `date`.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Whole days between two instants, rounded up, ignoring direction.
pub fn ceil_days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    let millis = (b - a).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// `YYYY-MM-DD` for the UTC date of `instant`.
pub fn iso_date(instant: DateTime<Utc>) -> String {
    instant.date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn ceil_days_rounds_partial_days_up() {
        let start = start_of_day_utc(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(ceil_days_between(start, start), 0);
        assert_eq!(ceil_days_between(start, start + Duration::milliseconds(1)), 1);
        assert_eq!(ceil_days_between(start, start + Duration::days(10)), 10);
        assert_eq!(
            ceil_days_between(start, start + Duration::days(10) + Duration::hours(1)),
            11
        );
    }

    #[test]
    fn ceil_days_ignores_direction() {
        let start = start_of_day_utc(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let end = start + Duration::hours(49);
        assert_eq!(ceil_days_between(start, end), ceil_days_between(end, start));
    }

    #[test]
    fn iso_date_uses_utc_calendar_day() {
        let instant = start_of_day_utc(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap())
            + Duration::hours(23);
        assert_eq!(iso_date(instant), "2025-12-31");
    }
}
