//! # Measurement Patterns Module
//!
//! This module contains the amount regex and the bilingual unit alias table
//! used by the amount parser.

use crate::ingredient_model::Unit;
use lazy_static::lazy_static;
use regex::Regex;

// Leading decimal numeral, an optional "/denominator", then the unit text,
// which may span lines. ASCII digits only: Arabic-Indic digits are folded
// before matching.
pub const AMOUNT_PATTERN: &str =
    r"(?s)^(?P<number>[0-9]*\.?[0-9]+)(?:\s*/\s*(?P<denominator>[0-9]+))?\s*(?P<unit>.*)$";

lazy_static! {
    pub static ref AMOUNT_REGEX: Regex =
        Regex::new(AMOUNT_PATTERN).expect("Amount pattern should be valid");

    /// Unit aliases in lookup order, keys already lowercase
    pub static ref UNIT_ALIASES: Vec<(&'static str, Unit)> = vec![
        // Weight
        ("g", Unit::Gram),
        ("gr", Unit::Gram),
        ("gm", Unit::Gram),
        ("gram", Unit::Gram),
        ("grams", Unit::Gram),
        ("gramme", Unit::Gram),
        ("جرام", Unit::Gram),
        ("جم", Unit::Gram),
        ("غرام", Unit::Gram),
        ("غ", Unit::Gram),
        ("جرامات", Unit::Gram),
        ("kg", Unit::Kilogram),
        ("kgs", Unit::Kilogram),
        ("kilo", Unit::Kilogram),
        ("kilos", Unit::Kilogram),
        ("kilogram", Unit::Kilogram),
        ("kilograms", Unit::Kilogram),
        ("كيلو", Unit::Kilogram),
        ("كجم", Unit::Kilogram),
        ("كغ", Unit::Kilogram),
        ("كيلوجرام", Unit::Kilogram),
        ("كيلوغرام", Unit::Kilogram),
        // Volume
        ("ml", Unit::Milliliter),
        ("milliliter", Unit::Milliliter),
        ("milliliters", Unit::Milliliter),
        ("millilitre", Unit::Milliliter),
        ("millilitres", Unit::Milliliter),
        ("مل", Unit::Milliliter),
        ("ملل", Unit::Milliliter),
        ("مليلتر", Unit::Milliliter),
        ("l", Unit::Liter),
        ("ltr", Unit::Liter),
        ("liter", Unit::Liter),
        ("liters", Unit::Liter),
        ("litre", Unit::Liter),
        ("litres", Unit::Liter),
        ("لتر", Unit::Liter),
        ("لترات", Unit::Liter),
        ("cup", Unit::Cup),
        ("cups", Unit::Cup),
        ("كوب", Unit::Cup),
        ("كوبان", Unit::Cup),
        ("كوبين", Unit::Cup),
        ("أكواب", Unit::Cup),
        ("اكواب", Unit::Cup),
        ("tbsp", Unit::Tablespoon),
        ("tbs", Unit::Tablespoon),
        ("tablespoon", Unit::Tablespoon),
        ("tablespoons", Unit::Tablespoon),
        ("ملعقة كبيرة", Unit::Tablespoon),
        ("ملاعق كبيرة", Unit::Tablespoon),
        ("م.ك", Unit::Tablespoon),
        ("tsp", Unit::Teaspoon),
        ("teaspoon", Unit::Teaspoon),
        ("teaspoons", Unit::Teaspoon),
        ("ملعقة صغيرة", Unit::Teaspoon),
        ("ملاعق صغيرة", Unit::Teaspoon),
        ("م.ص", Unit::Teaspoon),
        // Count
        ("piece", Unit::Piece),
        ("pieces", Unit::Piece),
        ("pc", Unit::Piece),
        ("pcs", Unit::Piece),
        ("حبة", Unit::Piece),
        ("حبات", Unit::Piece),
        ("قطعة", Unit::Piece),
        ("قطع", Unit::Piece),
    ];
}
