use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    token: String,
    reason: &'static str,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex value {:?}: {}", self.token, self.reason)
    }
}

impl std::error::Error for ParseError {}

/// Parses `1000`, `0x1000` or `0X1000` into the same value.
pub fn parse_hex(token: &str) -> Result<u64, ParseError> {
    let trimmed = token.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let err = |reason| ParseError {
        token: token.to_string(),
        reason,
    };

    if digits.is_empty() {
        return Err(err("no digits"));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(err("not a hex digit"));
    }
    u64::from_str_radix(digits, 16).map_err(|_| err("wider than 64 bits"))
}

pub fn format_hex(value: u64) -> String {
    format!("{:#x}", value)
}
