//! Text normalization applied to both documents before embedding.
//!
//! Output is lowercase ASCII alphanumerics, single spaces, and `.,;'"!?`. Filtering
//! happens before whitespace collapse so the function is idempotent.


use serde_json::Value;

const ALLOWED_PUNCTUATION: &[char] = &['.', ',', ';', '\'', '"', '!', '?'];

/// Normalizes free text (lowercase, allowlist filter, whitespace collapse, trim).
pub fn normalize(text: &str) -> String {
    let filtered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| is_allowed(*c))
        .collect();

    let mut out = String::with_capacity(filtered.len());
    for word in filtered.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Normalizes a JSON value; anything that is not a string becomes `""`.
pub fn normalize_value(value: &Value) -> String {
    match value {
        Value::String(s) => normalize(s),
        _ => String::new(),
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_lowercase()
        || c.is_ascii_digit()
        || c.is_whitespace()
        || ALLOWED_PUNCTUATION.contains(&c)
}
