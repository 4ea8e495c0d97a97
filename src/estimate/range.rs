//! Free-text death-count grammar
//!
//! ```text
//! estimate  := unknown | count | count "-" count
//! unknown   := "" | "--"
//! count     := digits with optional "," separators and at most one "."
//! ```
//!
//! Shorthand ranges drop trailing digits on the left side: in `"3-4,000,000"`
//! the `3` stands for `3,000,000`. When the right side carries thousands
//! separators and the left side is a bare digit string, the left value is
//! padded with zeros up to the digit count of the right side.
//!
//! The padding rule only knows this one writing convention. A left side with
//! more digits than the right gets a negative exponent and shrinks; that
//! behavior is kept as is rather than guessed at.

use super::Bounds;
use std::fmt;

/// Markers used by the source tables for "no known figure".
const UNKNOWN_MARKERS: [&str; 2] = ["", "--"];

/// Text that does not follow the estimate grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// One side of a range, or the whole value, is empty (`"-5,000"`).
    Empty { text: String },
    /// A number contains characters other than digits, commas and one point.
    InvalidNumber { text: String, number: String },
    /// The number is too large to represent.
    Overflow { text: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty { text } => write!(f, "empty number in {:?}", text),
            ParseError::InvalidNumber { text, number } => {
                write!(f, "invalid number {:?} in {:?}", number, text)
            }
            ParseError::Overflow { text } => write!(f, "number out of range in {:?}", text),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a death-count string into bounds.
///
/// Returns `Ok(None)` for the unknown markers, never zero.
pub fn parse(text: &str) -> Result<Option<Bounds>, ParseError> {
    let trimmed = text.trim();
    if UNKNOWN_MARKERS.contains(&trimmed) {
        return Ok(None);
    }

    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

    let Some((left, right)) = compact.split_once('-') else {
        let value = parse_number(&compact, text)?;
        return Ok(Some(Bounds::exact(value)));
    };

    let right_value = parse_number(right, text)?;
    let left_value = if is_shorthand(left, right) {
        expand_shorthand(left, right, text)?
    } else {
        parse_number(left, text)?
    };

    Ok(Some(Bounds::new(left_value, right_value)))
}

/// `"3"` against `"4,000,000"`: bare digits on the left, separators on the right.
fn is_shorthand(left: &str, right: &str) -> bool {
    right.contains(',')
        && !left.is_empty()
        && left.bytes().all(|b| b.is_ascii_digit())
}

fn expand_shorthand(left: &str, right: &str, text: &str) -> Result<f64, ParseError> {
    let right_digits = right.chars().filter(|&c| c != ',').count();
    let exponent = right_digits as i32 - left.len() as i32;
    let value = parse_number(left, text)? * 10f64.powi(exponent);
    if !value.is_finite() {
        return Err(ParseError::Overflow {
            text: text.to_string(),
        });
    }
    Ok(value)
}

/// Parse one count with its thousands separators stripped.
fn parse_number(number: &str, text: &str) -> Result<f64, ParseError> {
    let digits: String = number.chars().filter(|&c| c != ',').collect();
    if digits.is_empty() {
        return Err(ParseError::Empty {
            text: text.to_string(),
        });
    }

    let points = digits.chars().filter(|&c| c == '.').count();
    let well_formed = points <= 1
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.');
    if !well_formed {
        return Err(ParseError::InvalidNumber {
            text: text.to_string(),
            number: number.to_string(),
        });
    }

    let value: f64 = digits.parse().map_err(|_| ParseError::InvalidNumber {
        text: text.to_string(),
        number: number.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ParseError::Overflow {
            text: text.to_string(),
        });
    }
    Ok(value)
}
