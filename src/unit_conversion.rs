//! # Unit Conversion
//!
//! Promotes a magnitude from a small unit to a larger one once a threshold is
//! crossed (1000 gram → 1 kg). Rules are walked in table order and only the
//! first applicable rule fires per call.

use crate::ingredient_model::Unit;
use lazy_static::lazy_static;
use log::debug;

/// A single "upgrade" rule: `from` becomes `to` once the amount reaches `factor`
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRule {
    pub from: Unit,
    pub to: Unit,
    pub factor: f64,
}

lazy_static! {
    /// Upgrade rules in match order
    pub static ref CONVERSION_RULES: Vec<ConversionRule> = vec![
        ConversionRule { from: Unit::Gram, to: Unit::Kilogram, factor: 1000.0 },
        ConversionRule { from: Unit::Milliliter, to: Unit::Liter, factor: 1000.0 },
        ConversionRule { from: Unit::Teaspoon, to: Unit::Tablespoon, factor: 3.0 },
        ConversionRule { from: Unit::Tablespoon, to: Unit::Cup, factor: 16.0 },
    ];
}

/// Convert an amount, promoting its unit when a rule applies
///
/// With no `target`, the first rule for `unit` whose factor the amount meets
/// or exceeds divides the amount by that factor and rounds it to two
/// decimals. Explicit targets are not supported: the amount and unit come
/// back unchanged.
///
/// # Examples
///
/// ```rust
/// use recipes::ingredient_model::Unit;
/// use recipes::unit_conversion::convert_unit;
///
/// assert_eq!(convert_unit(1000.0, &Unit::Gram, None), (1.0, Unit::Kilogram));
/// assert_eq!(convert_unit(999.0, &Unit::Gram, None), (999.0, Unit::Gram));
/// ```
pub fn convert_unit(amount: f64, unit: &Unit, target: Option<&Unit>) -> (f64, Unit) {
    if let Some(target) = target {
        debug!(
            "Conversion from {} to explicit target {} is not supported, keeping input",
            unit, target
        );
        return (amount, unit.clone());
    }

    let rule = CONVERSION_RULES
        .iter()
        .filter(|rule| rule.from == *unit)
        .find(|rule| amount >= rule.factor);

    match rule {
        Some(rule) => (round_to_hundredths(amount / rule.factor), rule.to.clone()),
        None => (amount, unit.clone()),
    }
}

/// The combined factor of the rules that promote `from` into `to`, if any
///
/// Follows the first rule of each unit in turn, so teaspoon → cup is 3 × 16.
pub fn promotion_factor(from: &Unit, to: &Unit) -> Option<f64> {
    let mut current = from;
    let mut factor = 1.0;
    for _ in 0..CONVERSION_RULES.len() {
        let rule = CONVERSION_RULES.iter().find(|rule| rule.from == *current)?;
        factor *= rule.factor;
        if rule.to == *to {
            return Some(factor);
        }
        current = &rule.to;
    }
    None
}

/// Round to two decimal places, halves away from zero
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
