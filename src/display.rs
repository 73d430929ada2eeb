//! Display helpers

use jiff::civil::Date;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

use crate::query::filters::days_since;

/// Format a price as whole Australian dollars with thousands separators, e.g. `$2,800`.
pub fn format_aud(price: &Money<'_, Currency>) -> String {
    let dollars = Decimal::new(price.to_minor_units(), 2)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default();

    let digits = dollars.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(digit);
    }

    if dollars < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Relative posted date: `Today`, `1d ago`, `12d ago`, then `DD/MM/YYYY` from 30 days on.
pub fn posted_ago(posted: Date, today: Date) -> String {
    match days_since(posted, today) {
        Some(0) => "Today".to_string(),
        Some(days) if days < 30 => format!("{days}d ago"),
        _ => posted.strftime("%d/%m/%Y").to_string(),
    }
}

/// Uppercase initials of the first two words.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Shorten `text` to `max` characters, ending with `...` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let cut: String = text.chars().take(max).collect();

    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::AUD;

    use super::*;

    #[test]
    fn formats_whole_dollars() {
        assert_eq!(format_aud(&Money::from_minor(280_000, AUD)), "$2,800");
        assert_eq!(format_aud(&Money::from_minor(35_000, AUD)), "$350");
        assert_eq!(format_aud(&Money::from_minor(123_456_789, AUD)), "$1,234,568");
        assert_eq!(format_aud(&Money::from_minor(0, AUD)), "$0");
    }

    #[test]
    fn posted_ago_buckets() {
        let posted = date(2025, 5, 28);

        assert_eq!(posted_ago(posted, date(2025, 5, 28)), "Today");
        assert_eq!(posted_ago(posted, date(2025, 5, 29)), "1d ago");
        assert_eq!(posted_ago(posted, date(2025, 6, 26)), "29d ago");
        assert_eq!(posted_ago(posted, date(2025, 6, 27)), "28/05/2025");
    }

    #[test]
    fn initials_from_first_two_words() {
        assert_eq!(initials("Sarah Johnson"), "SJ");
        assert_eq!(initials("alex van der berg"), "AV");
        assert_eq!(initials("  Madonna "), "M");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("Standing desk", 20), "Standing desk");
        assert_eq!(truncate("Standing desk", 9), "Standing...");
    }
}
