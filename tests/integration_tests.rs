//! # Integration Tests
//!
//! End-to-end checks of the ingredient pipeline and of loading a household
//! data file into the store.

use recipes::household_model::{DataFile, NewRecipe};
use recipes::ingredient_model::{Category, Language, ProcessedIngredient, RawIngredient, Unit};
use recipes::ingredient_processing::{combine_ingredients, group_by_category, process_ingredients};
use recipes::store::MemStorage;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_incomplete_entries_are_dropped() {
    let raw = vec![
        RawIngredient::new("", "2 cups"),
        RawIngredient::new("Salt", ""),
        RawIngredient::new("Rice", "500 gram"),
    ];

    let processed = process_ingredients(&raw);

    assert_eq!(processed.len(), 1);
    assert_eq!(processed[0].name, "Rice");
    assert_eq!(processed[0].amount, 500.0);
    assert_eq!(processed[0].unit, Unit::Gram);
    assert_eq!(processed[0].category, Category::Grains);
}

#[test]
fn test_combining_two_recipes() {
    let first = process_ingredients(&[
        RawIngredient::new("Flour", "400 gram"),
        RawIngredient::new("Olive oil", "2 tbsp"),
    ]);
    let second = process_ingredients(&[
        RawIngredient::new("flour", "700 g"),
        RawIngredient::new("Olive Oil", "15 tbsp"),
    ]);

    let combined = combine_ingredients(&[first, second]);

    assert_eq!(combined.len(), 2);
    assert_eq!(combined[0].name, "Flour");
    assert_eq!(combined[0].unit, Unit::Kilogram);
    assert!((combined[0].amount - 1.1).abs() < 0.01);

    // 2 + 15 tablespoons crosses the cup threshold
    assert_eq!(combined[1].name, "Olive oil");
    assert_eq!(combined[1].unit, Unit::Cup);
    assert!((combined[1].amount - 1.06).abs() < 0.01);
}

#[test]
fn test_bilingual_lists_classify_alike() {
    let english = process_ingredients(&[RawIngredient::new("Tomato", "3 piece")]);
    let arabic = process_ingredients(&[RawIngredient::new("طماطم", "2 piece")]);

    assert_eq!(english[0].category, Category::Vegetables);
    assert_eq!(arabic[0].category, Category::Vegetables);
}

#[test]
fn test_grouped_output_is_sorted_and_non_empty() {
    let processed = process_ingredients(&[
        RawIngredient::new("onion", "2"),
        RawIngredient::new("Rice", "1 kg"),
        RawIngredient::new("Carrot", "3"),
        RawIngredient::new("Butter", "50 g"),
        RawIngredient::new("Bread", "1"),
    ]);

    let groups = group_by_category(&processed);

    assert_eq!(
        groups.keys().copied().collect::<Vec<_>>(),
        vec![Category::Vegetables, Category::Dairy, Category::Grains]
    );
    for bucket in groups.values() {
        assert!(!bucket.is_empty());
        let names: Vec<String> = bucket.iter().map(|i| i.name.to_lowercase()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}

#[test]
fn test_processed_ingredient_serialization() {
    let milk = ProcessedIngredient::new("Milk", 1.5, Unit::Liter, Category::Dairy);
    let json = serde_json::to_value(&milk).unwrap();

    assert_eq!(json["unit"], "liter");
    assert_eq!(json["category"], "dairy");
}

#[test]
fn test_data_file_loads_into_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("household.json");
    fs::write(
        &path,
        r#"{
            "recipes": [
                {
                    "title": "Bread",
                    "title_ar": "خبز",
                    "ingredients": [{ "name": "Flour", "amount": "400 gram" }],
                    "ingredients_ar": [{ "name": "دقيق", "amount": "٤٠٠ جرام" }]
                },
                {
                    "title": "Cake",
                    "ingredients": [{ "name": "flour", "amount": "700 gram" }]
                }
            ],
            "pantry": [
                { "name": "Rice", "quantity": 2, "unit": "kg" }
            ]
        }"#,
    )
    .unwrap();

    let data: DataFile = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let store = MemStorage::new();
    store.seed(data).unwrap();

    assert_eq!(store.list_recipes().len(), 2);
    assert_eq!(store.list_pantry_items()[0].category, Category::Grains);

    let items = store.add_recipes_to_shopping_list(&[1, 2], Language::En).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, "1.1");
    assert_eq!(items[0].unit, "kg");
    assert_eq!(items[0].recipe_id, None);

    let arabic = store.add_recipes_to_shopping_list(&[1], Language::Ar).unwrap();
    assert_eq!(arabic[0].name, "دقيق");
    assert_eq!(arabic[0].quantity, "400");
    assert_eq!(arabic[0].unit, "gram");
    assert_eq!(arabic[0].recipe_id, Some(1));
}

#[test]
fn test_demo_data_file_is_valid() {
    let content = fs::read_to_string("demos/household.json").unwrap();
    let data: DataFile = serde_json::from_str(&content).unwrap();

    let store = MemStorage::new();
    store.seed(data).unwrap();
    let ids: Vec<u64> = store.list_recipes().iter().map(|r| r.id).collect();
    let items = store.add_recipes_to_shopping_list(&ids, Language::En).unwrap();

    let oil = items.iter().find(|item| item.name == "Olive oil").unwrap();
    assert_eq!(oil.quantity, "4");
    assert_eq!(oil.unit, "tablespoon");
    assert_eq!(oil.category, Category::Oils);
}

#[test]
fn test_invalid_recipe_in_data_file_is_rejected() {
    let data = DataFile {
        recipes: vec![NewRecipe::new("Soup"), NewRecipe::new("  ")],
        pantry: vec![],
    };

    let store = MemStorage::new();
    assert!(store.seed(data).is_err());
}
