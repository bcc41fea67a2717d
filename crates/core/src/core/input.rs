//! Numeric input parsing.
//!
//! Reads the way a browser's `parseFloat` does: leading script whitespace
//! (see [`is_script_whitespace`]) is skipped, the longest decimal-literal
//! prefix is taken and anything after it is ignored. Unlike `parseFloat`,
//! non-finite results are rejected.

use crate::error::InputError;

#[derive(Debug, Clone, Copy, Default)]
pub struct InputReader;

impl InputReader {
    pub fn new() -> Self {
        Self
    }

    /// Parse one finite number from raw text.
    pub fn read(&self, raw: &str) -> Result<f64, InputError> {
        let text = raw.trim_start_matches(is_script_whitespace);
        let len = numeric_prefix_len(text.as_bytes());
        if len == 0 {
            let rest = text.strip_prefix(['+', '-']).unwrap_or(text);
            if rest.starts_with("Infinity") {
                return Err(InputError::NotFinite {
                    raw: raw.to_string(),
                });
            }
            return Err(InputError::NotANumber {
                raw: raw.to_string(),
            });
        }

        let value: f64 = text[..len].parse().map_err(|_| InputError::NotANumber {
            raw: raw.to_string(),
        })?;
        if !value.is_finite() {
            return Err(InputError::NotFinite {
                raw: raw.to_string(),
            });
        }
        Ok(value)
    }
}

/// Whitespace and line terminators as a script engine's number parsing skips
/// them. This differs from [`char::is_whitespace`]: U+FEFF counts, U+0085 does not.
pub fn is_script_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{9}'
            | '\u{A}'
            | '\u{B}'
            | '\u{C}'
            | '\u{D}'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Length of the longest prefix matching `[+-]? digits [. digits] [(e|E) [+-] digits]`
/// with at least one mantissa digit, or 0.
fn numeric_prefix_len(b: &[u8]) -> usize {
    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        mantissa_digits += j - frac_start;
        // A lone '.' only counts when digits precede it ("5." is 5).
        if mantissa_digits > 0 {
            i = j;
        }
    }

    if mantissa_digits == 0 {
        return 0;
    }

    if i < b.len() && matches!(b[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < b.len() && matches!(b[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}
