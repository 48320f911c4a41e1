//! Display helpers shared by the views

use once_cell::sync::Lazy;
use regex_lite::Regex;

static EMAIL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Loose email shape check: something@domain.tld with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().map(|re| re.is_match(email)).unwrap_or(false)
}

/// Format a price with two decimals and the euro sign
pub fn format_price(price: f64) -> String {
    format!("{:.2}€", price)
}

/// Cut `text` to `length` characters, appending "..." when it was longer
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() > length {
        let head: String = text.chars().take(length).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
