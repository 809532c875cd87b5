use once_cell::sync::Lazy;
use regex::Regex;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$").unwrap());

/// `#rgb` or `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// Shaped `local@domain.tld`.
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Three ASCII letters, e.g. `USD` or `kes`.
pub fn is_currency_code(value: &str) -> bool {
    value.len() == 3 && value.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#2563EB"));
        assert!(!is_hex_color("2563eb"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#ggg"));
    }

    #[test]
    fn test_email() {
        assert!(is_email("ops@acme.co.ke"));
        assert!(!is_email("ops@acme"));
        assert!(!is_email("ops acme@x.com"));
        assert!(!is_email(""));
    }

    #[test]
    fn test_currency_code() {
        assert!(is_currency_code("KES"));
        assert!(!is_currency_code("US"));
        assert!(!is_currency_code("U5D"));
    }
}
