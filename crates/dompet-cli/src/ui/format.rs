//! String formatting for amounts, dates, categories and progress.

use chrono::{DateTime, Local, Utc};

/// Emoji labels for the default categories.
const CATEGORY_EMOJI: &[(&str, &str)] = &[
    ("Salary", "\u{1F4B0}"),
    ("Freelance", "\u{1F4BB}"),
    ("Investment", "\u{1F4C8}"),
    ("Gift", "\u{1F381}"),
    ("Other Income", "\u{1F4B5}"),
    ("Food & Dining", "\u{1F354}"),
    ("Transportation", "\u{1F697}"),
    ("Shopping", "\u{1F6CD}\u{FE0F}"),
    ("Entertainment", "\u{1F3AC}"),
    ("Bills & Utilities", "\u{1F4A1}"),
    ("Healthcare", "\u{1F3E5}"),
    ("Education", "\u{1F4DA}"),
    ("Other Expense", "\u{1F4B8}"),
];

/// Shown for user-created and orphaned category names.
const FALLBACK_EMOJI: &str = "\u{1F4DD}";

pub fn category_emoji(name: &str) -> &'static str {
    CATEGORY_EMOJI
        .iter()
        .find(|(category, _)| *category == name)
        .map(|(_, emoji)| *emoji)
        .unwrap_or(FALLBACK_EMOJI)
}

/// Category name, prefixed with its emoji in unicode mode.
pub fn category_label(name: &str, unicode: bool) -> String {
    if unicode {
        format!("{} {}", category_emoji(name), name)
    } else {
        name.to_string()
    }
}

/// `1234.5` -> `1,234.50`; compact mode abbreviates to `1.2K`, `3.4M`, `5.6B`.
pub fn format_amount(amount: f64, compact: bool) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let magnitude = amount.abs();

    if compact {
        for (threshold, suffix) in [(1e9, "B"), (1e6, "M"), (1e3, "K")] {
            if magnitude >= threshold {
                return format!("{}{:.1}{}", sign, magnitude / threshold, suffix);
            }
        }
    }

    let fixed = format!("{:.2}", magnitude);
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}{}.{}", sign, group_thousands(whole), fraction)
}

/// Amount with the currency code in front.
pub fn format_money(amount: f64, currency: &str, compact: bool) -> String {
    format!("{} {}", currency, format_amount(amount, compact))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Local calendar date and time of a stored timestamp.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Fixed-width bar for a ratio in `0.0..=1.0`.
pub fn progress_bar(ratio: f64, width: usize, unicode: bool) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * width as f64).round() as usize;
    let (full, empty) = if unicode {
        ("\u{2588}", "\u{2591}")
    } else {
        ("#", "-")
    };
    format!("{}{}", full.repeat(filled), empty.repeat(width - filled))
}

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_category_emoji() {
        assert_eq!(category_emoji("Salary"), "\u{1F4B0}");
        assert_eq!(category_emoji("Rent"), FALLBACK_EMOJI);
    }

    #[test]
    fn test_category_label_ascii() {
        assert_eq!(category_label("Gift", false), "Gift");
        assert_eq!(category_label("Gift", true), "\u{1F381} Gift");
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0, false), "0.00");
        assert_eq!(format_amount(999.5, false), "999.50");
        assert_eq!(format_amount(1234.5, false), "1,234.50");
        assert_eq!(format_amount(1234567.0, false), "1,234,567.00");
        assert_eq!(format_amount(-400.0, false), "-400.00");
    }

    #[test]
    fn test_format_amount_compact() {
        assert_eq!(format_amount(950.0, true), "950.00");
        assert_eq!(format_amount(35_000.0, true), "35.0K");
        assert_eq!(format_amount(1_240_000.0, true), "1.2M");
        assert_eq!(format_amount(-2_000_000_000.0, true), "-2.0B");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(42.5, "IDR", false), "IDR 42.50");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.5, 10, false), "#####-----");
        assert_eq!(progress_bar(1.7, 4, false), "####");
        assert_eq!(progress_bar(f64::NAN, 4, false), "----");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("Grab\nride"), "Grab ride");
    }
}
