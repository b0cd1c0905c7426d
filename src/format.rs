//! Display helpers for dates, account numbers and text.

use chrono::{DateTime, Utc};

/// Account numbers display zero-padded to this width
const ACCOUNT_NUMBER_WIDTH: usize = 6;

/// Render a timestamp as `dd/MM/yyyy HH:mm`.
pub fn format_datetime(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y %H:%M").to_string()
}

/// Render a timestamp as `dd/MM/yyyy`.
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

/// Zero-pad an account number for display: `"1234"` becomes `"001234"`.
/// Numbers already at or past the display width are left unchanged.
pub fn format_account_number(account_number: &str) -> String {
    let trimmed = account_number.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    format!("{:0>width$}", trimmed, width = ACCOUNT_NUMBER_WIDTH)
}

/// Truncate text to `max_len` characters, appending `...` when cut.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(format_datetime(&ts), "09/03/2024 14:05");
        assert_eq!(format_date(&ts), "09/03/2024");
    }

    #[test]
    fn test_format_account_number() {
        assert_eq!(format_account_number("1234"), "001234");
        assert_eq!(format_account_number("123456"), "123456");
        assert_eq!(format_account_number("1234567"), "1234567");
        assert_eq!(format_account_number(""), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 50), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("", 10), "");
    }
}
