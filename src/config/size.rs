//! Settings specify file limits as "10M" or "512k" but the rotating file compares raw
//! bytes; these two functions bridge that gap.

use crate::Error;

const UNIT: u64 = 1024;

/// Parses a byte count with an optional `K`/`M`/`G` (or `KB`/`MB`/`GB`) suffix, base 1024.
///
/// The numeric part may carry a `0x`, `0o` or `0b` radix prefix. Suffixes are
/// case-insensitive and surrounding whitespace is ignored.
///
/// # Errors
/// `Error::InvalidSize` for anything that is not a non-negative integer with a known
/// suffix, or that overflows `u64`.
pub fn parse_size(s: &str) -> Result<u64, Error> {
    let invalid = || Error::InvalidSize(s.to_string());

    let upper = s.trim().to_ascii_uppercase();
    let digits = match upper.strip_suffix('B') {
        Some(d) if d.ends_with(['K', 'M', 'G']) => d,
        _ => upper.as_str(),
    };

    let (digits, multiplier) = match digits.as_bytes().last() {
        Some(b'G') => (&digits[..digits.len() - 1], UNIT * UNIT * UNIT),
        Some(b'M') => (&digits[..digits.len() - 1], UNIT * UNIT),
        Some(b'K') => (&digits[..digits.len() - 1], UNIT),
        _ => (digits, 1),
    };

    let digits = digits.trim();
    let (radix, digits) = if let Some(hex) = digits.strip_prefix("0X") {
        (16, hex)
    } else if let Some(oct) = digits.strip_prefix("0O") {
        (8, oct)
    } else if let Some(bin) = digits.strip_prefix("0B") {
        (2, bin)
    } else {
        (10, digits)
    };

    u64::from_str_radix(digits, radix)
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(invalid)
}

/// Raw byte counts are unreadable in diagnostics.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    let bytes_f = bytes as f64;

    if bytes >= UNIT * UNIT * UNIT {
        format!("{:.2} GB", bytes_f / (UNIT * UNIT * UNIT) as f64)
    } else if bytes >= UNIT * UNIT {
        format!("{:.2} MB", bytes_f / (UNIT * UNIT) as f64)
    } else if bytes >= UNIT {
        format!("{:.2} KB", bytes_f / UNIT as f64)
    } else {
        format!("{bytes} B")
    }
}
