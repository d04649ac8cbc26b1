//! # Household Recipes
//!
//! A bilingual (English/Arabic) recipe manager. Recipes carry free-text
//! ingredient lists; the ingredient pipeline normalizes unit aliases, parses
//! amounts, classifies ingredients into grocery categories, converts small
//! units into larger ones, merges ingredients across recipes and groups them
//! for a shopping list. An in-memory store keeps recipes, the shopping list,
//! the pantry and a tool list.

pub mod categorization;
pub mod config;
pub mod household_model;
pub mod ingredient_model;
pub mod ingredient_processing;
pub mod localization;
pub mod measurement_patterns;
pub mod store;
pub mod store_errors;
pub mod text_processing;
pub mod unit_conversion;
