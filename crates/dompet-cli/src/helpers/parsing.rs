//! Parsing helpers for dates, durations, months and enum arguments.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

use dompet_core::period;
use dompet_core::storage::{BudgetPeriod, TransactionKind};

use crate::app::CliError;

/// Parse a datetime (RFC 3339, or `YYYY-MM-DD` meaning local midnight).
pub fn parse_datetime(value: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(period::day_range(&Local, date).start);
    }

    Err(CliError::invalid_input(format!(
        "Invalid date/time (expected ISO-8601 or YYYY-MM-DD): {}",
        value
    ))
    .into())
}

/// Parse a duration string (e.g., "7d", "24h").
pub fn parse_duration(value: &str) -> anyhow::Result<Duration> {
    let invalid = |reason: &str| -> anyhow::Error {
        CliError::invalid_input(format!("Invalid duration {}: {}", value, reason)).into()
    };

    let (split, unit) = value
        .char_indices()
        .last()
        .ok_or_else(|| invalid("expected <number><unit>"))?;
    let num_str = &value[..split];
    if num_str.is_empty() {
        return Err(invalid("expected <number><unit>"));
    }

    let amount: i64 = num_str.parse().map_err(|_| invalid("not a number"))?;
    if amount <= 0 {
        return Err(invalid("must be positive"));
    }

    let duration = match unit {
        'd' => Duration::try_days(amount),
        'w' => Duration::try_weeks(amount),
        'h' => Duration::try_hours(amount),
        _ => return Err(invalid("use d/w/h")),
    };
    duration.ok_or_else(|| invalid("too large"))
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d").map_err(|_| {
        CliError::invalid_input(format!("Invalid month (expected YYYY-MM): {}", value)).into()
    })
}

pub fn parse_kind(value: &str) -> anyhow::Result<TransactionKind> {
    value.trim().to_lowercase().parse().map_err(|_| {
        CliError::invalid_input(format!(
            "Unknown type \"{}\" (use income or expense)",
            value
        ))
        .into()
    })
}

pub fn parse_period(value: &str) -> anyhow::Result<BudgetPeriod> {
    value.trim().to_lowercase().parse().map_err(|_| {
        CliError::invalid_input(format!(
            "Unknown period \"{}\" (use daily, weekly or monthly)",
            value
        ))
        .into()
    })
}
