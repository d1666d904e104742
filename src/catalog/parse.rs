//! Parsing of free-form preference and availability fields.
//!
//! Fields arrive as comma-separated text (`"Monday, Wednesday"`, `"1,2, 3"`).
//! Parsing never fails: empty and malformed tokens are dropped, and an
//! absent field yields an empty list, which downstream code reads as
//! "unconstrained".

/// Splits a comma-separated field into trimmed, non-empty tokens.
///
/// Duplicates are collapsed, keeping the first occurrence.
pub fn parse_list(text: Option<&str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in tokens(text) {
        if !out.iter().any(|t| t == token) {
            out.push(token.to_string());
        }
    }
    out
}

/// Parses a comma-separated list of session numbers.
///
/// Tokens that are neither an integer nor a finite non-negative decimal are
/// skipped. Decimals are truncated (`"2.0"` → 2).
pub fn parse_sessions(text: Option<&str>) -> Vec<u32> {
    let mut out: Vec<u32> = Vec::new();
    for session in tokens(text).filter_map(parse_session) {
        if !out.contains(&session) {
            out.push(session);
        }
    }
    out
}

fn tokens(text: Option<&str>) -> impl Iterator<Item = &str> {
    text.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn parse_session(token: &str) -> Option<u32> {
    if let Ok(n) = token.parse::<u32>() {
        return Some(n);
    }
    let value = token.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value < u32::MAX as f64 {
        Some(value.trunc() as u32)
    } else {
        None
    }
}
