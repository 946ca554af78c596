use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Check a phone number against international numbering rules.
/// The number must carry its country calling code (`+1 ...`).
pub fn is_valid_phone(input: &str) -> bool {
    match phonenumber::parse(None, input) {
        Ok(number) => phonenumber::is_valid(&number),
        Err(_) => false,
    }
}

/// Basic `local@domain.tld` shape check
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_RE.is_match(input)
}
