//! # Text Processing Module
//!
//! This module turns the free-text amount authored on a recipe ("2 cups",
//! "500 جرام", "كوبان") into a numeric magnitude and a canonical unit.
//!
//! ## Features
//!
//! - Unit alias normalization for English and Arabic tokens, abbreviated or spelled out
//! - Greedy leading-decimal extraction, with simple `n/d` fractions
//! - Arabic-Indic digits and the Arabic decimal separator
//! - Fail-soft: every input yields a result, malformed text degrades to a best guess

use crate::ingredient_model::Unit;
use crate::measurement_patterns::{AMOUNT_REGEX, UNIT_ALIASES};
use log::trace;

/// The magnitude and unit read from an amount string
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAmount {
    /// Numeric magnitude, `1` when no numeral could be read
    pub amount: f64,
    /// Alias-normalized unit
    pub unit: Unit,
}

impl ParsedAmount {
    pub fn new(amount: f64, unit: Unit) -> Self {
        Self { amount, unit }
    }
}

/// Map a raw unit token to its canonical unit
///
/// Lookup is case-insensitive and ignores surrounding whitespace. Tokens with
/// no registered alias come back as [`Unit::Other`] carrying the trimmed
/// token verbatim; an empty token is a `piece`.
///
/// # Examples
///
/// ```rust
/// use recipes::ingredient_model::Unit;
/// use recipes::text_processing::normalize_unit;
///
/// assert_eq!(normalize_unit("Cups"), Unit::Cup);
/// assert_eq!(normalize_unit("جم"), Unit::Gram);
/// assert_eq!(normalize_unit("bunch"), Unit::Other("bunch".to_string()));
/// ```
pub fn normalize_unit(token: &str) -> Unit {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Unit::Piece;
    }

    let key = trimmed.to_lowercase();
    let key = key.trim_end_matches('.');
    match UNIT_ALIASES.iter().find(|(alias, _)| *alias == key) {
        Some((_, unit)) => unit.clone(),
        None => {
            trace!("No alias registered for unit token '{}'", trimmed);
            Unit::Other(trimmed.to_string())
        }
    }
}

/// Parse a free-text amount into a magnitude and unit
///
/// - `"2.5 cups"` → 2.5 cup
/// - `"500جرام"` → 500 gram
/// - `"3"` → 3 piece
/// - `"كوبان"` → 1 cup (no numeral, whole text is the unit)
/// - `""` → 1 piece
///
/// # Examples
///
/// ```rust
/// use recipes::ingredient_model::Unit;
/// use recipes::text_processing::parse_amount;
///
/// let parsed = parse_amount("2 cups");
/// assert_eq!(parsed.amount, 2.0);
/// assert_eq!(parsed.unit, Unit::Cup);
/// ```
pub fn parse_amount(text: &str) -> ParsedAmount {
    let folded = fold_arabic_digits(text.trim());

    let Some(captures) = AMOUNT_REGEX.captures(&folded) else {
        trace!("No leading numeral in '{}', defaulting amount to 1", folded);
        return ParsedAmount::new(1.0, normalize_unit(&folded));
    };

    let number = captures
        .name("number")
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite());
    let Some(number) = number else {
        return ParsedAmount::new(1.0, normalize_unit(&folded));
    };

    let denominator = captures
        .name("denominator")
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|d| *d > 0.0);

    let amount = match denominator {
        Some(denominator) => number / denominator,
        None => number,
    };

    // A zero denominator leaves "/0" out of the unit text but keeps the numerator.
    let unit_text = captures.name("unit").map(|m| m.as_str()).unwrap_or_default();

    ParsedAmount::new(amount, normalize_unit(unit_text))
}

/// Replace Arabic-Indic and extended Arabic-Indic digits with ASCII digits
///
/// The Arabic decimal separator `٫` becomes `.`.
pub fn fold_arabic_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            '\u{066B}' => '.',
            other => other,
        })
        .collect()
}
