//! Duration strings.
//!
//! Admins type durations as a bare number of seconds or a number with a
//! unit suffix. Players see them as `1h 2m 3s` in chat and as a `H:MM:SS`
//! countdown on token items.

use crate::ParseError;

/// Seconds a token grants when no duration is given.
pub const DEFAULT_TOKEN_DURATION_SECS: u64 = 60;

/// Parses `90`, `30s`, `5m`, `2h` or `1d` into seconds.
///
/// Suffixes are case-insensitive and surrounding whitespace is ignored.
/// Empty input means [`DEFAULT_TOKEN_DURATION_SECS`].
///
/// # Errors
/// [`ParseError::InvalidDuration`] for anything that is not a
/// non-negative integer with an optional known suffix, or that overflows.
///
/// ```rust
/// use zonegate_types::parse_duration;
///
/// assert_eq!(parse_duration("5m").unwrap(), 300);
/// assert_eq!(parse_duration("").unwrap(), 60);
/// assert!(parse_duration("soon").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<u64, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_TOKEN_DURATION_SECS);
    }

    let invalid = || ParseError::InvalidDuration(input.to_string());

    let (digits, multiplier) = match trimmed.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => {
            let mult = match c.to_ascii_lowercase() {
                's' => 1,
                'm' => 60,
                'h' => 3_600,
                'd' => 86_400,
                _ => return Err(invalid()),
            };
            (&trimmed[..idx], mult)
        }
        _ => (trimmed, 1),
    };

    // `u64::from_str` accepts a leading `+`; admins never mean that.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let value: u64 = digits.parse().map_err(|_| invalid())?;
    value.checked_mul(multiplier).ok_or_else(invalid)
}

/// Formats seconds as `1h 2m 3s`, leaving out zero components.
///
/// Zero is `0s`.
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".to_string();
    }

    let hours = seconds / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if secs > 0 {
        parts.push(format!("{secs}s"));
    }
    parts.join(" ")
}

/// Formats seconds as an `H:MM:SS` countdown. Hours are not capped.
pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;
    format!("{hours}:{minutes:02}:{secs:02}")
}
