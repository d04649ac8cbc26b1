//! # Household Data Model
//!
//! Records kept by the store: recipes with their per-language ingredient and
//! tool lists, shopping-list entries, pantry inventory and tool-list entries,
//! along with the validated bodies used to create or change them.

use crate::ingredient_model::{Category, Language, RawIngredient, Unit};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Maximum length of a recipe title
pub const MAX_TITLE_LENGTH: u64 = 200;

/// A stored recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub title: String,
    pub title_ar: String,
    pub description: Option<String>,
    /// English ingredient list
    pub ingredients: Vec<RawIngredient>,
    /// Arabic ingredient list
    pub ingredients_ar: Vec<RawIngredient>,
    pub tools: Vec<String>,
    pub tools_ar: Vec<String>,
    pub instructions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body used to create or replace a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewRecipe {
    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = MAX_TITLE_LENGTH))]
    pub title_ar: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RawIngredient>,
    #[serde(default)]
    pub ingredients_ar: Vec<RawIngredient>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub tools_ar: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Partial recipe update; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RecipePatch {
    #[validate(
        length(min = 1, max = MAX_TITLE_LENGTH),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,
    #[validate(length(max = MAX_TITLE_LENGTH))]
    pub title_ar: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<RawIngredient>>,
    pub ingredients_ar: Option<Vec<RawIngredient>>,
    pub tools: Option<Vec<String>>,
    pub tools_ar: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
}

/// An entry on the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: u64,
    pub name: String,
    /// Display quantity (e.g., "1.1")
    pub quantity: String,
    /// Canonical unit text (e.g., "kg")
    pub unit: String,
    pub category: Category,
    pub checked: bool,
    pub recipe_id: Option<u64>,
}

/// Body used to add a shopping-list entry by hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewShoppingItem {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Classified from the name when absent
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub recipe_id: Option<u64>,
}

/// Partial shopping-list update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ShoppingItemPatch {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub category: Option<Category>,
    pub checked: Option<bool>,
}

/// An item kept in the pantry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: u64,
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub category: Category,
    /// Quantity at or below which the item counts as low on stock
    pub low_stock_threshold: Option<f64>,
    pub expiry_date: Option<NaiveDate>,
}

/// Body used to add a pantry item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewPantryItem {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    #[serde(default)]
    pub unit: Unit,
    /// Classified from the name when absent
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub low_stock_threshold: Option<f64>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

/// Partial pantry update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PantryItemPatch {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub quantity: Option<f64>,
    pub unit: Option<Unit>,
    pub category: Option<Category>,
    #[validate(range(min = 0.0))]
    pub low_stock_threshold: Option<f64>,
    pub expiry_date: Option<NaiveDate>,
}

/// An entry on the kitchen tool list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolItem {
    pub id: u64,
    pub name: String,
    pub checked: bool,
    pub recipe_id: Option<u64>,
}

/// Body used to add a tool-list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewToolItem {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    pub recipe_id: Option<u64>,
}

/// Something in the pantry that needs attention
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PantryAlert {
    /// Quantity is at or below the item's threshold
    LowStock { item: PantryItem },
    /// Expiry date is before today
    Expired { item: PantryItem },
    /// Expiry date falls within the warning window
    ExpiringSoon { item: PantryItem, days_left: i64 },
}

/// Seed document loaded by the command-line tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub recipes: Vec<NewRecipe>,
    #[serde(default)]
    pub pantry: Vec<NewPantryItem>,
}

impl Recipe {
    /// The ingredient list authored for `language`
    pub fn ingredients_for(&self, language: Language) -> &[RawIngredient] {
        match language {
            Language::En => &self.ingredients,
            Language::Ar => &self.ingredients_ar,
        }
    }

    /// The tool list authored for `language`
    pub fn tools_for(&self, language: Language) -> &[String] {
        match language {
            Language::En => &self.tools,
            Language::Ar => &self.tools_ar,
        }
    }

    /// The title for `language`, falling back to the English title when blank
    pub fn title_for(&self, language: Language) -> &str {
        match language {
            Language::Ar if !self.title_ar.trim().is_empty() => &self.title_ar,
            _ => &self.title,
        }
    }
}

impl NewRecipe {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_ingredient(mut self, name: &str, amount: &str) -> Self {
        self.ingredients.push(RawIngredient::new(name, amount));
        self
    }

    pub fn with_arabic_ingredient(mut self, name: &str, amount: &str) -> Self {
        self.ingredients_ar.push(RawIngredient::new(name, amount));
        self
    }

    pub fn with_tool(mut self, name: &str) -> Self {
        self.tools.push(name.to_string());
        self
    }
}

impl NewShoppingItem {
    pub fn new(name: &str, quantity: &str, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
            category: None,
            recipe_id: None,
        }
    }
}

impl NewPantryItem {
    pub fn new(name: &str, quantity: f64, unit: Unit) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit,
            category: None,
            low_stock_threshold: None,
            expiry_date: None,
        }
    }

    pub fn with_low_stock_threshold(mut self, threshold: f64) -> Self {
        self.low_stock_threshold = Some(threshold);
        self
    }

    pub fn with_expiry_date(mut self, date: NaiveDate) -> Self {
        self.expiry_date = Some(date);
        self
    }
}

impl PantryItem {
    /// Whether the quantity is at or below the configured threshold
    pub fn is_low_on_stock(&self) -> bool {
        self.low_stock_threshold
            .is_some_and(|threshold| self.quantity <= threshold)
    }
}

impl PantryAlert {
    /// The pantry item the alert is about
    pub fn item(&self) -> &PantryItem {
        match self {
            PantryAlert::LowStock { item }
            | PantryAlert::Expired { item }
            | PantryAlert::ExpiringSoon { item, .. } => item,
        }
    }
}

fn default_quantity() -> String {
    "1".to_string()
}

fn default_unit() -> String {
    Unit::Piece.to_string()
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_recipe_validation() {
        assert!(NewRecipe::new("Shakshuka").validate().is_ok());
        assert!(NewRecipe::new("").validate().is_err());
        assert!(NewRecipe::new("   ").validate().is_err());
        assert!(NewRecipe::new(&"x".repeat(201)).validate().is_err());
    }

    #[test]
    fn test_recipe_patch_validation() {
        assert!(RecipePatch::default().validate().is_ok());
        let blank = RecipePatch {
            title: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_pantry_item_validation() {
        assert!(NewPantryItem::new("Rice", 2.0, Unit::Kilogram).validate().is_ok());
        assert!(NewPantryItem::new("Rice", -1.0, Unit::Kilogram).validate().is_err());
        assert!(NewPantryItem::new("Rice", 1.0, Unit::Kilogram)
            .with_low_stock_threshold(-0.5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_new_recipe_deserializes_with_defaults() {
        let recipe: NewRecipe = serde_json::from_str(
            r#"{"title": "Lentil soup", "ingredients": [{"name": "Lentils", "amount": "1 cup"}]}"#,
        )
        .unwrap();

        assert_eq!(recipe.title, "Lentil soup");
        assert_eq!(recipe.ingredients, vec![RawIngredient::new("Lentils", "1 cup")]);
        assert!(recipe.ingredients_ar.is_empty());
        assert!(recipe.tools.is_empty());
    }

    #[test]
    fn test_new_shopping_item_defaults() {
        let item: NewShoppingItem = serde_json::from_str(r#"{"name": "Bread"}"#).unwrap();
        assert_eq!(item.quantity, "1");
        assert_eq!(item.unit, "piece");
        assert_eq!(item.category, None);
    }

    #[test]
    fn test_pantry_alert_serializes_with_kind_tag() {
        let item = PantryItem {
            id: 1,
            name: "Milk".to_string(),
            quantity: 0.5,
            unit: Unit::Liter,
            category: Category::Dairy,
            low_stock_threshold: Some(1.0),
            expiry_date: None,
        };
        let json = serde_json::to_value(PantryAlert::LowStock { item }).unwrap();
        assert_eq!(json["kind"], "low_stock");
        assert_eq!(json["item"]["unit"], "liter");
    }
}
