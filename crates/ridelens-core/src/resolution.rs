//! Calendar resolutions and bucket boundary mapping.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Resolution enumeration for chart bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// One bucket per calendar day (input granularity).
    Daily,
    /// Calendar weeks ending on Sunday.
    Weekly,
    /// Calendar months.
    Monthly,
}

impl Resolution {
    /// Returns a short label for this resolution.
    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Daily => "daily",
            Resolution::Weekly => "weekly",
            Resolution::Monthly => "monthly",
        }
    }

    /// Returns all available resolutions in order.
    pub fn all() -> &'static [Resolution] {
        &[Resolution::Daily, Resolution::Weekly, Resolution::Monthly]
    }

    /// Maps a record date to its bucket key.
    ///
    /// Daily is the identity. Weekly maps to the Sunday ending the date's
    /// week, Monthly to the last day of the date's month, so every date in
    /// a bucket shares one key.
    pub fn bucket_date(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Resolution::Daily => date,
            Resolution::Weekly => {
                let to_sunday = 6 - date.weekday().num_days_from_monday();
                date.checked_add_days(Days::new(u64::from(to_sunday)))
                    .unwrap_or(date)
            }
            Resolution::Monthly => {
                let (year, month) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1)
                    .and_then(|first| first.pred_opt())
                    .unwrap_or(date)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_is_identity() {
        let d = date(2022, 7, 14);
        assert_eq!(Resolution::Daily.bucket_date(d), d);
    }

    #[test]
    fn test_weekly_closing_sunday() {
        // 2022-07-14 is a Thursday; its week closes on Sunday 2022-07-17.
        assert_eq!(
            Resolution::Weekly.bucket_date(date(2022, 7, 14)),
            date(2022, 7, 17)
        );
        // Monday starts the week that closes six days later.
        assert_eq!(
            Resolution::Weekly.bucket_date(date(2022, 7, 11)),
            date(2022, 7, 17)
        );
    }

    #[test]
    fn test_weekly_sunday_identity() {
        let sunday = date(2022, 7, 17);
        assert_eq!(Resolution::Weekly.bucket_date(sunday), sunday);
    }

    #[test]
    fn test_monthly_month_end() {
        assert_eq!(
            Resolution::Monthly.bucket_date(date(2021, 1, 15)),
            date(2021, 1, 31)
        );
        assert_eq!(
            Resolution::Monthly.bucket_date(date(2021, 12, 1)),
            date(2021, 12, 31)
        );
    }

    #[test]
    fn test_monthly_leap_february() {
        assert_eq!(
            Resolution::Monthly.bucket_date(date(2020, 2, 10)),
            date(2020, 2, 29)
        );
        assert_eq!(
            Resolution::Monthly.bucket_date(date(2021, 2, 10)),
            date(2021, 2, 28)
        );
    }

    #[test]
    fn test_labels() {
        let labels: Vec<&str> = Resolution::all().iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["daily", "weekly", "monthly"]);
    }
}
