//! Derived statistics over aggregation results.

use chrono::NaiveDate;

use crate::storage::DailyStat;

/// Expand a sparse daily series into one row per day from `start` to `end`
/// inclusive, with zero rows for days that had no transactions.
///
/// Entries outside the span are dropped. An inverted span yields an empty series.
pub fn zero_fill(daily: &[DailyStat], start: NaiveDate, end: NaiveDate) -> Vec<DailyStat> {
    let mut filled = Vec::new();
    let mut source = daily.iter().peekable();

    for day in start.iter_days().take_while(|day| *day <= end) {
        while source.next_if(|stat| stat.day < day).is_some() {}

        match source.next_if(|stat| stat.day == day) {
            Some(stat) => filled.push(stat.clone()),
            None => filled.push(DailyStat {
                day,
                income: 0.0,
                expense: 0.0,
            }),
        }
    }

    filled
}

/// Change from `previous` to `current` in percent.
///
/// With no previous value the change is 0 when nothing happened now either,
/// otherwise 100.
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current == 0.0 { 0.0 } else { 100.0 };
    }
    (current - previous) / previous * 100.0
}
