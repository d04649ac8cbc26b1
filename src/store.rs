//! # In-Memory Store
//!
//! `MemStorage` keeps recipes, shopping-list items, pantry items and tool
//! items in ordered maps behind a single lock. Nothing is persisted. Every
//! successful mutation bumps a store-wide revision that clients poll to know
//! when to refetch.

use crate::categorization::classify;
use crate::household_model::{
    DataFile, NewPantryItem, NewRecipe, NewShoppingItem, NewToolItem, PantryAlert, PantryItem,
    PantryItemPatch, Recipe, RecipePatch, ShoppingItemPatch, ShoppingListItem, ToolItem,
};
use crate::ingredient_model::{Category, Language, ProcessedIngredient};
use crate::ingredient_processing::{combine_ingredients, compare_names, process_ingredients};
use crate::store_errors::StoreError;
use chrono::{NaiveDate, Utc};
use log::{debug, info};
use std::collections::{BTreeMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use validator::Validate;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Default)]
struct Tables {
    recipes: BTreeMap<u64, Recipe>,
    shopping: BTreeMap<u64, ShoppingListItem>,
    pantry: BTreeMap<u64, PantryItem>,
    tools: BTreeMap<u64, ToolItem>,
    next_recipe_id: u64,
    next_shopping_id: u64,
    next_pantry_id: u64,
    next_tool_id: u64,
    revision: u64,
}

impl Tables {
    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    fn allocate(counter: &mut u64) -> u64 {
        *counter += 1;
        *counter
    }
}

/// Volatile store for all household records
#[derive(Debug, Default)]
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl MemStorage {
    /// Create an empty store at revision 0
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current revision; changes whenever any record changes
    pub fn revision(&self) -> u64 {
        self.read().revision
    }

    /// Load recipes and pantry items from a seed document
    pub fn seed(&self, data: DataFile) -> StoreResult<()> {
        info!(
            "Seeding store with {} recipe(s) and {} pantry item(s)",
            data.recipes.len(),
            data.pantry.len()
        );
        for recipe in data.recipes {
            self.create_recipe(recipe)?;
        }
        for item in data.pantry {
            self.create_pantry_item(item)?;
        }
        Ok(())
    }

    // ----- Recipes -----

    /// All recipes in id order
    pub fn list_recipes(&self) -> Vec<Recipe> {
        self.read().recipes.values().cloned().collect()
    }

    pub fn get_recipe(&self, id: u64) -> StoreResult<Recipe> {
        self.read()
            .recipes
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("recipe", id))
    }

    /// Recipes whose English or Arabic title contains `query`, ignoring case
    pub fn search_recipes(&self, query: &str) -> Vec<Recipe> {
        let needle = query.trim().to_lowercase();
        self.read()
            .recipes
            .values()
            .filter(|recipe| {
                recipe.title.to_lowercase().contains(&needle)
                    || recipe.title_ar.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn create_recipe(&self, body: NewRecipe) -> StoreResult<Recipe> {
        body.validate()?;

        let mut tables = self.write();
        let id = Tables::allocate(&mut tables.next_recipe_id);
        let now = Utc::now();
        let recipe = Recipe {
            id,
            title: body.title.trim().to_string(),
            title_ar: body.title_ar.trim().to_string(),
            description: body.description,
            ingredients: body.ingredients,
            ingredients_ar: body.ingredients_ar,
            tools: body.tools,
            tools_ar: body.tools_ar,
            instructions: body.instructions,
            created_at: now,
            updated_at: now,
        };
        tables.recipes.insert(id, recipe.clone());
        let revision = tables.bump();

        info!("Recipe {} created ('{}'), revision {}", id, recipe.title, revision);
        Ok(recipe)
    }

    /// Replace every field of a recipe, keeping its id and creation time
    pub fn replace_recipe(&self, id: u64, body: NewRecipe) -> StoreResult<Recipe> {
        body.validate()?;

        let mut tables = self.write();
        let recipe = tables
            .recipes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("recipe", id))?;
        recipe.title = body.title.trim().to_string();
        recipe.title_ar = body.title_ar.trim().to_string();
        recipe.description = body.description;
        recipe.ingredients = body.ingredients;
        recipe.ingredients_ar = body.ingredients_ar;
        recipe.tools = body.tools;
        recipe.tools_ar = body.tools_ar;
        recipe.instructions = body.instructions;
        recipe.updated_at = Utc::now();
        let recipe = recipe.clone();
        tables.bump();

        info!("Recipe {} replaced", id);
        Ok(recipe)
    }

    pub fn update_recipe(&self, id: u64, patch: RecipePatch) -> StoreResult<Recipe> {
        patch.validate()?;

        let mut tables = self.write();
        let recipe = tables
            .recipes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("recipe", id))?;
        if let Some(title) = patch.title {
            recipe.title = title.trim().to_string();
        }
        if let Some(title_ar) = patch.title_ar {
            recipe.title_ar = title_ar.trim().to_string();
        }
        if let Some(description) = patch.description {
            recipe.description = Some(description);
        }
        if let Some(ingredients) = patch.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(ingredients_ar) = patch.ingredients_ar {
            recipe.ingredients_ar = ingredients_ar;
        }
        if let Some(tools) = patch.tools {
            recipe.tools = tools;
        }
        if let Some(tools_ar) = patch.tools_ar {
            recipe.tools_ar = tools_ar;
        }
        if let Some(instructions) = patch.instructions {
            recipe.instructions = instructions;
        }
        recipe.updated_at = Utc::now();
        let recipe = recipe.clone();
        tables.bump();

        info!("Recipe {} updated", id);
        Ok(recipe)
    }

    pub fn delete_recipe(&self, id: u64) -> StoreResult<()> {
        let mut tables = self.write();
        tables
            .recipes
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("recipe", id))?;
        tables.bump();

        info!("Recipe {} deleted", id);
        Ok(())
    }

    // ----- Shopping list -----

    /// All shopping-list items in id order
    pub fn list_shopping_items(&self) -> Vec<ShoppingListItem> {
        self.read().shopping.values().cloned().collect()
    }

    pub fn create_shopping_item(&self, body: NewShoppingItem) -> StoreResult<ShoppingListItem> {
        body.validate()?;

        let name = body.name.trim().to_string();
        let category = body.category.unwrap_or_else(|| classify(&name));
        let mut tables = self.write();
        let id = Tables::allocate(&mut tables.next_shopping_id);
        let item = ShoppingListItem {
            id,
            name,
            quantity: body.quantity.trim().to_string(),
            unit: body.unit.trim().to_string(),
            category,
            checked: false,
            recipe_id: body.recipe_id,
        };
        tables.shopping.insert(id, item.clone());
        tables.bump();

        debug!("Shopping item {} created ('{}')", id, item.name);
        Ok(item)
    }

    /// Apply a partial update; a new name without a category is reclassified
    pub fn update_shopping_item(
        &self,
        id: u64,
        patch: ShoppingItemPatch,
    ) -> StoreResult<ShoppingListItem> {
        patch.validate()?;

        let mut tables = self.write();
        let item = tables
            .shopping
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("shopping item", id))?;
        if let Some(name) = patch.name {
            item.name = name.trim().to_string();
            if patch.category.is_none() {
                item.category = classify(&item.name);
            }
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity.trim().to_string();
        }
        if let Some(unit) = patch.unit {
            item.unit = unit.trim().to_string();
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        if let Some(checked) = patch.checked {
            item.checked = checked;
        }
        let item = item.clone();
        tables.bump();

        debug!("Shopping item {} updated", id);
        Ok(item)
    }

    /// Flip the checked flag of a shopping-list item
    pub fn toggle_shopping_item(&self, id: u64) -> StoreResult<ShoppingListItem> {
        let mut tables = self.write();
        let item = tables
            .shopping
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("shopping item", id))?;
        item.checked = !item.checked;
        let item = item.clone();
        tables.bump();
        Ok(item)
    }

    pub fn delete_shopping_item(&self, id: u64) -> StoreResult<()> {
        let mut tables = self.write();
        tables
            .shopping
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("shopping item", id))?;
        tables.bump();
        Ok(())
    }

    /// Remove every checked item, returning how many were removed
    pub fn clear_checked_shopping_items(&self) -> usize {
        let mut tables = self.write();
        let before = tables.shopping.len();
        tables.shopping.retain(|_, item| !item.checked);
        let removed = before - tables.shopping.len();
        if removed > 0 {
            tables.bump();
        }

        info!("Cleared {} checked shopping item(s)", removed);
        removed
    }

    /// Add the ingredients of one or more recipes to the shopping list
    ///
    /// Each recipe's ingredient list for `language` is processed, the lists
    /// are combined by name and unit, and one item is stored per combined
    /// ingredient. Items carry the recipe id when a single recipe was added.
    /// Nothing is stored if any id is unknown.
    pub fn add_recipes_to_shopping_list(
        &self,
        recipe_ids: &[u64],
        language: Language,
    ) -> StoreResult<Vec<ShoppingListItem>> {
        let mut tables = self.write();

        let mut lists: Vec<Vec<ProcessedIngredient>> = Vec::with_capacity(recipe_ids.len());
        for id in recipe_ids {
            let recipe = tables
                .recipes
                .get(id)
                .ok_or_else(|| StoreError::not_found("recipe", *id))?;
            lists.push(process_ingredients(recipe.ingredients_for(language)));
        }

        let combined = combine_ingredients(&lists);
        let recipe_id = match recipe_ids {
            [single] => Some(*single),
            _ => None,
        };

        let mut created = Vec::with_capacity(combined.len());
        for ingredient in combined {
            let id = Tables::allocate(&mut tables.next_shopping_id);
            let item = ShoppingListItem {
                id,
                name: ingredient.name.clone(),
                quantity: ingredient.quantity_text(),
                unit: ingredient.unit.to_string(),
                category: ingredient.category,
                checked: false,
                recipe_id,
            };
            tables.shopping.insert(id, item.clone());
            created.push(item);
        }
        if !created.is_empty() {
            tables.bump();
        }

        info!(
            "Added {} shopping item(s) from {} recipe(s) in '{}'",
            created.len(),
            recipe_ids.len(),
            language
        );
        Ok(created)
    }

    /// Shopping-list items bucketed by category, each bucket sorted by name
    pub fn grouped_shopping_list(&self) -> BTreeMap<Category, Vec<ShoppingListItem>> {
        let mut groups: BTreeMap<Category, Vec<ShoppingListItem>> = BTreeMap::new();
        for item in self.read().shopping.values() {
            groups.entry(item.category).or_default().push(item.clone());
        }
        for bucket in groups.values_mut() {
            bucket.sort_by(|a, b| compare_names(&a.name, &b.name));
        }
        groups
    }

    // ----- Pantry -----

    /// All pantry items in id order
    pub fn list_pantry_items(&self) -> Vec<PantryItem> {
        self.read().pantry.values().cloned().collect()
    }

    pub fn create_pantry_item(&self, body: NewPantryItem) -> StoreResult<PantryItem> {
        body.validate()?;

        let name = body.name.trim().to_string();
        let category = body.category.unwrap_or_else(|| classify(&name));
        let mut tables = self.write();
        let id = Tables::allocate(&mut tables.next_pantry_id);
        let item = PantryItem {
            id,
            name,
            quantity: body.quantity,
            unit: body.unit,
            category,
            low_stock_threshold: body.low_stock_threshold,
            expiry_date: body.expiry_date,
        };
        tables.pantry.insert(id, item.clone());
        tables.bump();

        debug!("Pantry item {} created ('{}')", id, item.name);
        Ok(item)
    }

    /// Apply a partial update; a new name without a category is reclassified
    pub fn update_pantry_item(&self, id: u64, patch: PantryItemPatch) -> StoreResult<PantryItem> {
        patch.validate()?;

        let mut tables = self.write();
        let item = tables
            .pantry
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("pantry item", id))?;
        if let Some(name) = patch.name {
            item.name = name.trim().to_string();
            if patch.category.is_none() {
                item.category = classify(&item.name);
            }
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            item.unit = unit;
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        if let Some(threshold) = patch.low_stock_threshold {
            item.low_stock_threshold = Some(threshold);
        }
        if let Some(expiry_date) = patch.expiry_date {
            item.expiry_date = Some(expiry_date);
        }
        let item = item.clone();
        tables.bump();

        debug!("Pantry item {} updated", id);
        Ok(item)
    }

    pub fn delete_pantry_item(&self, id: u64) -> StoreResult<()> {
        let mut tables = self.write();
        tables
            .pantry
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("pantry item", id))?;
        tables.bump();
        Ok(())
    }

    /// Low-stock, expired and soon-to-expire pantry items
    ///
    /// An item expiring within `warning_days` of `today` (inclusive) is
    /// expiring soon; one whose expiry date is before `today` has expired. An
    /// item can raise both a stock and an expiry alert.
    pub fn pantry_alerts(&self, today: NaiveDate, warning_days: i64) -> Vec<PantryAlert> {
        let tables = self.read();
        let mut alerts = Vec::new();

        for item in tables.pantry.values() {
            if item.is_low_on_stock() {
                alerts.push(PantryAlert::LowStock { item: item.clone() });
            }
            if let Some(expiry) = item.expiry_date {
                let days_left = (expiry - today).num_days();
                if days_left < 0 {
                    alerts.push(PantryAlert::Expired { item: item.clone() });
                } else if days_left <= warning_days {
                    alerts.push(PantryAlert::ExpiringSoon {
                        item: item.clone(),
                        days_left,
                    });
                }
            }
        }

        debug!("Found {} pantry alert(s) for {}", alerts.len(), today);
        alerts
    }

    // ----- Tools -----

    /// All tool-list items in id order
    pub fn list_tool_items(&self) -> Vec<ToolItem> {
        self.read().tools.values().cloned().collect()
    }

    pub fn create_tool_item(&self, body: NewToolItem) -> StoreResult<ToolItem> {
        body.validate()?;

        let mut tables = self.write();
        let id = Tables::allocate(&mut tables.next_tool_id);
        let item = ToolItem {
            id,
            name: body.name.trim().to_string(),
            checked: false,
            recipe_id: body.recipe_id,
        };
        tables.tools.insert(id, item.clone());
        tables.bump();
        Ok(item)
    }

    /// Flip the checked flag of a tool-list item
    pub fn toggle_tool_item(&self, id: u64) -> StoreResult<ToolItem> {
        let mut tables = self.write();
        let item = tables
            .tools
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("tool item", id))?;
        item.checked = !item.checked;
        let item = item.clone();
        tables.bump();
        Ok(item)
    }

    pub fn delete_tool_item(&self, id: u64) -> StoreResult<()> {
        let mut tables = self.write();
        tables
            .tools
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("tool item", id))?;
        tables.bump();
        Ok(())
    }

    /// Add a recipe's tools for `language` to the tool list
    ///
    /// Tools already on the list (ignoring case) and blank names are skipped.
    /// Returns the items that were inserted.
    pub fn add_recipe_tools(&self, recipe_id: u64, language: Language) -> StoreResult<Vec<ToolItem>> {
        let mut tables = self.write();
        let tools = tables
            .recipes
            .get(&recipe_id)
            .ok_or_else(|| StoreError::not_found("recipe", recipe_id))?
            .tools_for(language)
            .to_vec();

        let mut known: HashSet<String> = tables
            .tools
            .values()
            .map(|tool| tool.name.to_lowercase())
            .collect();

        let mut created = Vec::new();
        for name in tools {
            let name = name.trim();
            if name.is_empty() || !known.insert(name.to_lowercase()) {
                continue;
            }
            let id = Tables::allocate(&mut tables.next_tool_id);
            let item = ToolItem {
                id,
                name: name.to_string(),
                checked: false,
                recipe_id: Some(recipe_id),
            };
            tables.tools.insert(id, item.clone());
            created.push(item);
        }
        if !created.is_empty() {
            tables.bump();
        }

        info!("Added {} tool(s) from recipe {}", created.len(), recipe_id);
        Ok(created)
    }
}
