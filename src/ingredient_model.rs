//! # Ingredient Data Model
//!
//! This module defines the data structures that flow through the ingredient
//! pipeline: the raw `{name, amount}` pairs authored on a recipe, the
//! processed form with a numeric amount, canonical unit and grocery category,
//! and the small enumerations those records are built from.
//!
//! ## Usage
//!
//! ```rust
//! use recipes::ingredient_model::{Category, ProcessedIngredient, RawIngredient, Unit};
//!
//! let raw = RawIngredient::new("Rice", "500 gram");
//! assert_eq!(raw.name, "Rice");
//!
//! let rice = ProcessedIngredient::new("Rice", 500.0, Unit::Gram, Category::Grains);
//! assert_eq!(rice.to_string(), "500 gram Rice");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ingredient as authored on a recipe form, in free-text form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawIngredient {
    /// Display name (e.g., "Tomato", "طماطم")
    pub name: String,

    /// Unparsed quantity text combining a numeral and a unit (e.g., "2 cups", "500 جرام")
    #[serde(default)]
    pub amount: String,
}

/// A normalized, categorized and unit-converted ingredient
///
/// Built on demand from a [`RawIngredient`] and never stored as such; only
/// its textual rendering ends up on a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedIngredient {
    /// Trimmed display name
    pub name: String,

    /// Finite, non-negative magnitude
    pub amount: f64,

    /// Canonical unit, or the raw token when no alias is registered
    pub unit: Unit,

    /// Grocery category derived from the name
    pub category: Category,
}

/// Grocery categories used to cluster shopping-list display
///
/// Declaration order is the order in which grouped output is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetables,
    Meat,
    Dairy,
    Grains,
    Spices,
    Oils,
    Other,
}

/// Units of measure after alias resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    Gram,
    Kilogram,
    Milliliter,
    Liter,
    Cup,
    Tablespoon,
    Teaspoon,
    #[default]
    Piece,
    /// Unrecognized token, carried verbatim
    Other(String),
}

/// Display languages supported for recipes and messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl RawIngredient {
    /// Create a raw ingredient from its name and amount text
    pub fn new(name: &str, amount: &str) -> Self {
        Self {
            name: name.to_string(),
            amount: amount.to_string(),
        }
    }

    /// Whether both fields carry non-whitespace text
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.amount.trim().is_empty()
    }
}

impl ProcessedIngredient {
    /// Create a processed ingredient
    pub fn new(name: &str, amount: f64, unit: Unit, category: Category) -> Self {
        Self {
            name: name.to_string(),
            amount,
            unit,
            category,
        }
    }

    /// The amount rendered for display and storage (e.g., "2", "1.1", "0.25")
    pub fn quantity_text(&self) -> String {
        format_amount(self.amount)
    }
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 7] = [
        Category::Vegetables,
        Category::Meat,
        Category::Dairy,
        Category::Grains,
        Category::Spices,
        Category::Oils,
        Category::Other,
    ];

    /// The lowercase identifier used in serialized data and message keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetables => "vegetables",
            Category::Meat => "meat",
            Category::Dairy => "dairy",
            Category::Grains => "grains",
            Category::Spices => "spices",
            Category::Oils => "oils",
            Category::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

impl Unit {
    /// Map a canonical unit name back to its variant; anything else is `Other`
    pub fn from_canonical(name: &str) -> Self {
        match name {
            "gram" => Unit::Gram,
            "kg" => Unit::Kilogram,
            "ml" => Unit::Milliliter,
            "liter" => Unit::Liter,
            "cup" => Unit::Cup,
            "tablespoon" => Unit::Tablespoon,
            "teaspoon" => Unit::Teaspoon,
            "piece" => Unit::Piece,
            other => Unit::Other(other.to_string()),
        }
    }

    /// The canonical spelling (or the raw token for `Other`)
    pub fn as_str(&self) -> &str {
        match self {
            Unit::Gram => "gram",
            Unit::Kilogram => "kg",
            Unit::Milliliter => "ml",
            Unit::Liter => "liter",
            Unit::Cup => "cup",
            Unit::Tablespoon => "tablespoon",
            Unit::Teaspoon => "teaspoon",
            Unit::Piece => "piece",
            Unit::Other(token) => token,
        }
    }
}

impl From<String> for Unit {
    fn from(name: String) -> Self {
        Unit::from_canonical(&name)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Other(token) => token,
            known => known.as_str().to_string(),
        }
    }
}

impl Language {
    /// BCP 47 primary language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Resolve a language tag such as "ar", "ar-EG" or "en_US"
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        match primary.as_str() {
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| format!("unsupported language: {s}"))
    }
}

/// Render a magnitude without trailing zeros, at most two decimals
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        return format!("{:.0}", amount);
    }
    let text = format!("{:.2}", amount);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Display for ProcessedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.quantity_text(), self.unit, self.name)
    }
}
