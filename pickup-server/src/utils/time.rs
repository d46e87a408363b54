//! Business-timezone helpers
//!
//! "Today" always means the calendar date in the configured business
//! timezone, never the host's local date.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Storage format for business dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Business date of an instant
pub fn business_date_at(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Current business date
pub fn today(tz: Tz) -> NaiveDate {
    business_date_at(Utc::now(), tz)
}

/// Key stored in `orders.pickup_date`
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whole days from `today` to `date` (negative for the past)
pub fn days_between(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_business_date_follows_timezone() {
        // 2026-03-01 23:30 UTC is already March 2nd in Shanghai (UTC+8)
        let instant = Utc.with_ymd_and_hms(2026, 3, 1, 23, 30, 0).unwrap();
        assert_eq!(
            business_date_at(instant, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert_eq!(
            business_date_at(instant, chrono_tz::Asia::Shanghai),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_date_key_and_days_between() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 30).unwrap();
        let later = NaiveDate::from_ymd_opt(2027, 1, 2).unwrap();
        assert_eq!(date_key(later), "2027-01-02");
        assert_eq!(days_between(today, later), 3);
        assert_eq!(days_between(later, today), -3);
    }
}
