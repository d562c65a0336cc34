//! Bet input parsing and normalization
//!
//! Raw text from the bet field is read with `parseInt`-style prefix rules and
//! then clamped into a stake the balance can cover. Nothing here reports an
//! error; anything unusable becomes a zero bet.

/// Leading integer of a raw input string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedInt {
    /// No digits after optional whitespace and sign
    Invalid,
    /// A negative value (magnitude dropped, it always normalizes to 0)
    Negative,
    /// Non-negative value, saturated at `u64::MAX`
    Value(u64),
}

/// Parse the leading base-10 integer of `raw`.
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit, so `"12abc"` and `"12.9"` both read as 12.
pub fn parse_leading_int(raw: &str) -> ParsedInt {
    // parseInt also skips the byte order mark, which is not Unicode whitespace
    let s = raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u64 = 0;
    let mut seen = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value.saturating_mul(10).saturating_add(u64::from(b - b'0'));
    }

    match (seen, negative) {
        (false, _) => ParsedInt::Invalid,
        (true, true) if value > 0 => ParsedInt::Negative,
        (true, _) => ParsedInt::Value(value),
    }
}

/// Normalize raw bet input to a stake in `0..=balance`
pub fn normalize_bet(raw: &str, balance: u64) -> u64 {
    match parse_leading_int(raw) {
        ParsedInt::Value(v) => v.min(balance),
        ParsedInt::Invalid | ParsedInt::Negative => 0,
    }
}
