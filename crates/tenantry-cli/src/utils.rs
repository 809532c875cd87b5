//! Utility functions for the Tenantry CLI

use chrono::{DateTime, Utc};

/// Format a datetime for display
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format an optional timestamp, blank-padded when absent
pub fn format_optional_datetime(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(format_datetime)
        .unwrap_or_else(|| " ".repeat(19))
}

/// Format size as human readable
pub fn format_size(bytes: u64, human_readable: bool) -> String {
    if human_readable {
        humansize::format_size(bytes, humansize::BINARY)
    } else {
        bytes.to_string()
    }
}

/// Shorten a cell to `max` characters for table output
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Confirm an action with the user
pub fn confirm(message: &str) -> bool {
    use std::io::{self, Write};

    print!("{} [y/N]: ", message);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(format_datetime(&dt), "2024-03-09 14:05:00");
        assert_eq!(format_optional_datetime(None).len(), 19);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0, true), "0 B");
        assert_eq!(format_size(1024, true), "1 KiB");
        assert_eq!(format_size(2048, false), "2048");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long slogan indeed", 10), "a very ...");
    }
}
