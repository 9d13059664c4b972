//! Calendar windows for budget periods and month-based summaries.
//!
//! Windows are computed in the caller's time zone (normally `Local`) at
//! full-day bounds, `00:00:00.000` through `23:59:59.999`, then converted to
//! UTC for comparison against stored dates. Weeks run Monday through Sunday.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::storage::types::{BudgetPeriod, DateRange};

/// The occurrence of `period` that contains `now`.
pub fn window<Tz: TimeZone>(period: BudgetPeriod, now: &DateTime<Tz>) -> DateRange {
    let tz = now.timezone();
    let today = now.date_naive();
    match period {
        BudgetPeriod::Daily => day_range(&tz, today),
        BudgetPeriod::Weekly => week_range(&tz, today),
        BudgetPeriod::Monthly => month_range(&tz, today),
    }
}

/// `day` from its first to its last millisecond.
pub fn day_range<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateRange {
    DateRange::new(start_of_day(tz, day), end_of_day(tz, day))
}

/// Monday through Sunday of the week containing `day`.
pub fn week_range<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateRange {
    let monday = first_day_of_week(day);
    DateRange::new(
        start_of_day(tz, monday),
        end_of_day(tz, monday + Duration::days(6)),
    )
}

/// First through last calendar day of the month containing `day`.
pub fn month_range<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateRange {
    DateRange::new(
        start_of_day(tz, first_day_of_month(day)),
        end_of_day(tz, last_day_of_month(day)),
    )
}

/// Monday of the week containing `day` (Sunday belongs to the week that started six days earlier).
pub fn first_day_of_week(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

pub fn first_day_of_month(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.day0()))
}

/// Last calendar day of the month containing `day` ("day 0 of next month").
pub fn last_day_of_month(day: NaiveDate) -> NaiveDate {
    let mut last = first_day_of_month(day) + Duration::days(27);
    while let Some(next) = last.succ_opt() {
        if next.month() != day.month() {
            break;
        }
        last = next;
    }
    last
}

/// First day of the month before the one containing `day`.
pub fn previous_month(day: NaiveDate) -> NaiveDate {
    first_day_of_month(first_day_of_month(day) - Duration::days(1))
}

/// Whole days left after `today` in the current occurrence of `period`.
pub fn days_left(period: BudgetPeriod, today: NaiveDate) -> u32 {
    match period {
        BudgetPeriod::Daily => 0,
        BudgetPeriod::Weekly => 6 - today.weekday().num_days_from_monday(),
        BudgetPeriod::Monthly => last_day_of_month(today).day() - today.day(),
    }
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    resolve_local(tz, day.and_time(NaiveTime::MIN))
}

fn end_of_day<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let next_midnight = day.and_time(NaiveTime::MIN) + Duration::days(1);
    resolve_local(tz, next_midnight - Duration::milliseconds(1))
}

/// Map a wall-clock time to UTC. Ambiguous times take the earlier instant;
/// times skipped by a DST jump are pushed forward by an hour.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap() + Duration::milliseconds(ms as i64)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_window_covers_whole_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 13, 15, 42, 0).unwrap();
        let range = window(BudgetPeriod::Daily, &now);

        assert_eq!(range.start, utc(2024, 3, 13, 0, 0, 0, 0));
        assert_eq!(range.end, utc(2024, 3, 13, 23, 59, 59, 999));
    }

    #[test]
    fn test_weekly_window_starts_monday() {
        // Wednesday
        let now = Utc.with_ymd_and_hms(2024, 3, 13, 8, 0, 0).unwrap();
        let range = window(BudgetPeriod::Weekly, &now);

        assert_eq!(range.start, utc(2024, 3, 11, 0, 0, 0, 0));
        assert_eq!(range.end, utc(2024, 3, 17, 23, 59, 59, 999));
    }

    #[test]
    fn test_weekly_window_on_sunday_reaches_back_six_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 17, 22, 0, 0).unwrap();
        let range = window(BudgetPeriod::Weekly, &now);

        assert_eq!(range.start, utc(2024, 3, 11, 0, 0, 0, 0));
        assert_eq!(range.end, utc(2024, 3, 17, 23, 59, 59, 999));
    }

    #[test]
    fn test_weekly_window_on_monday_starts_today() {
        let now = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();
        let range = window(BudgetPeriod::Weekly, &now);

        assert_eq!(range.start, utc(2024, 3, 11, 0, 0, 0, 0));
    }

    #[test]
    fn test_monthly_window_handles_leap_february() {
        let now = Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap();
        let range = window(BudgetPeriod::Monthly, &now);

        assert_eq!(range.start, utc(2024, 2, 1, 0, 0, 0, 0));
        assert_eq!(range.end, utc(2024, 2, 29, 23, 59, 59, 999));
    }

    #[test]
    fn test_monthly_window_in_december() {
        let now = Utc.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap();
        let range = window(BudgetPeriod::Monthly, &now);

        assert_eq!(range.start, utc(2023, 12, 1, 0, 0, 0, 0));
        assert_eq!(range.end, utc(2023, 12, 31, 23, 59, 59, 999));
    }

    #[test]
    fn test_window_uses_callers_offset() {
        let tz = FixedOffset::east_opt(7 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 3, 13, 1, 0, 0).unwrap();
        let range = window(BudgetPeriod::Daily, &now);

        // Local midnight at UTC+7 is 17:00 UTC the previous day.
        assert_eq!(range.start, utc(2024, 3, 12, 17, 0, 0, 0));
        assert_eq!(range.end, utc(2024, 3, 13, 16, 59, 59, 999));
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(date(2023, 2, 14)), date(2023, 2, 28));
        assert_eq!(last_day_of_month(date(2024, 4, 1)), date(2024, 4, 30));
        assert_eq!(last_day_of_month(date(2024, 1, 31)), date(2024, 1, 31));
    }

    #[test]
    fn test_previous_month_wraps_year() {
        assert_eq!(previous_month(date(2024, 1, 20)), date(2023, 12, 1));
        assert_eq!(previous_month(date(2024, 3, 31)), date(2024, 2, 1));
    }

    #[test]
    fn test_days_left() {
        // Wednesday
        assert_eq!(days_left(BudgetPeriod::Weekly, date(2024, 3, 13)), 4);
        assert_eq!(days_left(BudgetPeriod::Weekly, date(2024, 3, 17)), 0);
        assert_eq!(days_left(BudgetPeriod::Monthly, date(2024, 2, 10)), 19);
        assert_eq!(days_left(BudgetPeriod::Daily, date(2024, 2, 10)), 0);
    }
}
