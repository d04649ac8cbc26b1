//! # Ingredient Processing Pipeline
//!
//! Ties the amount parser, unit converter and category classifier together:
//! raw recipe ingredients are processed one by one, optionally merged across
//! recipes, and optionally bucketed by category for display.

use crate::categorization::classify;
use crate::ingredient_model::{Category, ProcessedIngredient, RawIngredient, Unit};
use crate::text_processing::parse_amount;
use crate::unit_conversion::{convert_unit, promotion_factor, round_to_hundredths};
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Process raw ingredients into normalized, categorized records
///
/// Entries whose name or amount is blank are dropped; the rest keep their
/// relative order.
pub fn process_ingredients(raw: &[RawIngredient]) -> Vec<ProcessedIngredient> {
    let processed: Vec<ProcessedIngredient> = raw
        .iter()
        .filter(|ingredient| ingredient.is_complete())
        .map(process_ingredient)
        .collect();

    if processed.len() < raw.len() {
        debug!(
            "Dropped {} incomplete ingredient(s) out of {}",
            raw.len() - processed.len(),
            raw.len()
        );
    }
    processed
}

/// Process a single raw ingredient, regardless of completeness
pub fn process_ingredient(raw: &RawIngredient) -> ProcessedIngredient {
    let parsed = parse_amount(&raw.amount);
    let (amount, unit) = convert_unit(parsed.amount, &parsed.unit, None);
    let name = raw.name.trim();

    trace!("Processed '{}' / '{}' -> {} {}", raw.name, raw.amount, amount, unit);

    ProcessedIngredient::new(name, amount, unit, classify(name))
}

/// Fold `incoming` into `entry` and re-run the converter on the total
///
/// When one unit promotes into the other, the amount in the smaller unit is
/// rescaled into the larger one and the sum rounded to two decimals.
fn merge_into(entry: &mut ProcessedIngredient, incoming: &ProcessedIngredient) {
    let (total, unit) = if entry.unit == incoming.unit {
        (entry.amount + incoming.amount, entry.unit.clone())
    } else if let Some(factor) = promotion_factor(&incoming.unit, &entry.unit) {
        (
            round_to_hundredths(entry.amount + incoming.amount / factor),
            entry.unit.clone(),
        )
    } else if let Some(factor) = promotion_factor(&entry.unit, &incoming.unit) {
        (
            round_to_hundredths(incoming.amount + entry.amount / factor),
            incoming.unit.clone(),
        )
    } else {
        (entry.amount + incoming.amount, entry.unit.clone())
    };

    let (amount, unit) = convert_unit(total, &unit, None);
    entry.amount = amount;
    entry.unit = unit;
}

/// Register the entry at `position` under its current unit
///
/// If another entry already holds that `(name, unit)` identity the two are
/// merged into whichever came first, and every key of the later one is
/// pointed at the survivor. Repeats while merging keeps promoting the unit.
fn settle(
    slots: &mut [Option<ProcessedIngredient>],
    index: &mut HashMap<(String, Unit), usize>,
    name: &str,
    mut position: usize,
) {
    loop {
        let Some(unit) = slots[position].as_ref().map(|entry| entry.unit.clone()) else {
            return;
        };
        let key = (name.to_string(), unit);
        let other = match index.get(&key).copied() {
            None => {
                index.insert(key, position);
                return;
            }
            Some(other) if other == position => return,
            Some(other) => other,
        };

        let (keep, dropped) = (position.min(other), position.max(other));
        let Some(later) = slots[dropped].take() else {
            return;
        };
        if let Some(entry) = slots[keep].as_mut() {
            merge_into(entry, &later);
        }
        for target in index.values_mut() {
            if *target == dropped {
                *target = keep;
            }
        }
        trace!("Merged promoted '{}' into entry {}", later.name, keep);
        position = keep;
    }
}

/// Merge processed ingredient lists by `(lowercase name, unit)`
///
/// Matching entries have their amounts summed and the unit converter re-run
/// on the running total after every merge, so repeated small amounts can
/// promote into a larger unit. A promoted entry takes on the identity of its
/// new unit: it absorbs any entry already in that unit, and later amounts in
/// either unit keep adding to it. The first spelling of a name wins and the
/// output keeps first-insertion order.
///
/// Rounding happens at each merge rather than once at the end, so many small
/// additions to an already promoted total can drift from the exact sum.
///
/// # Examples
///
/// ```rust
/// use recipes::ingredient_model::{Category, ProcessedIngredient, Unit};
/// use recipes::ingredient_processing::combine_ingredients;
///
/// let first = vec![ProcessedIngredient::new("Flour", 400.0, Unit::Gram, Category::Grains)];
/// let second = vec![ProcessedIngredient::new("flour", 700.0, Unit::Gram, Category::Grains)];
///
/// let combined = combine_ingredients(&[first, second]);
/// assert_eq!(combined.len(), 1);
/// assert_eq!(combined[0].name, "Flour");
/// assert_eq!(combined[0].unit, Unit::Kilogram);
/// assert!((combined[0].amount - 1.1).abs() < 0.01);
/// ```
pub fn combine_ingredients(lists: &[Vec<ProcessedIngredient>]) -> Vec<ProcessedIngredient> {
    let mut slots: Vec<Option<ProcessedIngredient>> = Vec::new();
    let mut index: HashMap<(String, Unit), usize> = HashMap::new();

    for ingredient in lists.iter().flatten() {
        let name = ingredient.name.to_lowercase();
        let key = (name.clone(), ingredient.unit.clone());
        let Some(position) = index.get(&key).copied() else {
            index.insert(key, slots.len());
            slots.push(Some(ingredient.clone()));
            continue;
        };

        if let Some(entry) = slots[position].as_mut() {
            merge_into(entry, ingredient);
        }
        settle(&mut slots, &mut index, &name, position);
    }

    let combined: Vec<ProcessedIngredient> = slots.into_iter().flatten().collect();
    debug!(
        "Combined {} list(s) into {} ingredient(s)",
        lists.len(),
        combined.len()
    );
    combined
}

/// Bucket ingredients by category, each bucket sorted by name
///
/// Only categories with at least one ingredient appear; buckets iterate in
/// [`Category`] declaration order.
pub fn group_by_category(
    ingredients: &[ProcessedIngredient],
) -> BTreeMap<Category, Vec<ProcessedIngredient>> {
    let mut groups: BTreeMap<Category, Vec<ProcessedIngredient>> = BTreeMap::new();
    for ingredient in ingredients {
        groups
            .entry(ingredient.category)
            .or_default()
            .push(ingredient.clone());
    }

    for bucket in groups.values_mut() {
        bucket.sort_by(|a, b| compare_names(&a.name, &b.name));
    }
    groups
}

/// Name ordering for display, in the manner of a locale collation
///
/// Names compare first on their letters alone, ignoring case and accents
/// ("Échalote" sorts with "e", not after "z"). Ties are broken by accents
/// (unaccented first), then by case (lowercase first), then by the exact text.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().nfd().cmp(b.to_lowercase().nfd()))
        .then_with(|| case_pattern(a).cmp(case_pattern(b)))
        .then_with(|| a.cmp(b))
}

/// Lowercase letters with combining marks removed (Latin accents, Arabic harakat)
fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn case_pattern(name: &str) -> impl Iterator<Item = bool> + '_ {
    name.chars().map(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(name: &str, amount: f64, unit: Unit, category: Category) -> ProcessedIngredient {
        ProcessedIngredient::new(name, amount, unit, category)
    }

    #[test]
    fn test_process_drops_incomplete_entries() {
        let raw = vec![
            RawIngredient::new("", "2 cups"),
            RawIngredient::new("Salt", ""),
            RawIngredient::new("Rice", "500 gram"),
        ];

        let result = process_ingredients(&raw);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0], processed("Rice", 500.0, Unit::Gram, Category::Grains));
    }

    #[test]
    fn test_process_converts_and_trims() {
        let raw = vec![
            RawIngredient::new("  Milk ", "1500 ml"),
            RawIngredient::new("Tomato", "3 piece"),
        ];

        let result = process_ingredients(&raw);

        assert_eq!(result[0], processed("Milk", 1.5, Unit::Liter, Category::Dairy));
        assert_eq!(result[1], processed("Tomato", 3.0, Unit::Piece, Category::Vegetables));
    }

    #[test]
    fn test_combine_sums_matching_keys() {
        let first = vec![processed("Flour", 400.0, Unit::Gram, Category::Grains)];
        let second = vec![processed("flour", 700.0, Unit::Gram, Category::Grains)];

        let combined = combine_ingredients(&[first, second]);

        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].name, "Flour");
        assert_eq!(combined[0].unit, Unit::Kilogram);
        assert!((combined[0].amount - 1.1).abs() < 0.01);
    }

    #[test]
    fn test_combine_keeps_different_units_apart() {
        let list = vec![
            processed("Onion", 2.0, Unit::Piece, Category::Vegetables),
            processed("Onion", 1.0, Unit::Cup, Category::Vegetables),
            processed("Garlic", 3.0, Unit::Piece, Category::Vegetables),
        ];

        let combined = combine_ingredients(&[list]);

        assert_eq!(combined.len(), 3);
        assert_eq!(combined[0].unit, Unit::Piece);
        assert_eq!(combined[1].unit, Unit::Cup);
        assert_eq!(combined[2].name, "Garlic");
    }

    #[test]
    fn test_combine_promotes_repeated_small_amounts() {
        let lists: Vec<Vec<ProcessedIngredient>> = (0..3)
            .map(|_| vec![processed("Sugar", 400.0, Unit::Gram, Category::Spices)])
            .collect();

        let combined = combine_ingredients(&lists);

        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].unit, Unit::Kilogram);
        assert_eq!(combined[0].amount, 1.2);
    }

    #[test]
    fn test_combine_incremental_rounding_drift() {
        let lists = vec![
            vec![processed("Flour", 600.0, Unit::Gram, Category::Grains)],
            vec![processed("Flour", 600.0, Unit::Gram, Category::Grains)],
            vec![processed("Flour", 4.0, Unit::Gram, Category::Grains)],
            vec![processed("Flour", 4.0, Unit::Gram, Category::Grains)],
            vec![processed("Flour", 4.0, Unit::Gram, Category::Grains)],
        ];

        let combined = combine_ingredients(&lists);

        // The exact total is 1.212 kg; each 4 g addition is rounded away.
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].unit, Unit::Kilogram);
        assert_eq!(combined[0].amount, 1.2);
    }

    #[test]
    fn test_combine_promoted_entry_joins_existing_unit() {
        let lists = vec![
            vec![processed("Flour", 1.5, Unit::Kilogram, Category::Grains)],
            vec![processed("Flour", 400.0, Unit::Gram, Category::Grains)],
            vec![processed("flour", 700.0, Unit::Gram, Category::Grains)],
        ];

        let combined = combine_ingredients(&lists);

        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].name, "Flour");
        assert_eq!(combined[0].unit, Unit::Kilogram);
        assert!((combined[0].amount - 2.6).abs() < 0.01);
    }

    #[test]
    fn test_combine_after_promotion_keeps_one_entry_per_identity() {
        let lists = vec![
            vec![processed("Sugar", 1.0, Unit::Tablespoon, Category::Spices)],
            vec![processed("Sugar", 2.0, Unit::Teaspoon, Category::Spices)],
            vec![processed("Sugar", 1.0, Unit::Teaspoon, Category::Spices)],
            vec![processed("Sugar", 1.0, Unit::Tablespoon, Category::Spices)],
            vec![processed("Sugar", 3.0, Unit::Teaspoon, Category::Spices)],
        ];

        let combined = combine_ingredients(&lists);

        // 3 tsp promote to 1 tbsp and join the tablespoon entry; the later
        // teaspoons are rescaled into it.
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].unit, Unit::Tablespoon);
        assert_eq!(combined[0].amount, 4.0);

        let mut identities: Vec<(String, Unit)> = combined
            .iter()
            .map(|i| (i.name.to_lowercase(), i.unit.clone()))
            .collect();
        identities.dedup();
        assert_eq!(identities.len(), combined.len());
    }

    #[test]
    fn test_combine_preserves_insertion_order() {
        let first = vec![
            processed("Tomato", 2.0, Unit::Piece, Category::Vegetables),
            processed("Rice", 200.0, Unit::Gram, Category::Grains),
        ];
        let second = vec![
            processed("Butter", 50.0, Unit::Gram, Category::Dairy),
            processed("tomato", 1.0, Unit::Piece, Category::Vegetables),
        ];

        let combined = combine_ingredients(&[first, second]);

        let names: Vec<&str> = combined.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Tomato", "Rice", "Butter"]);
        assert_eq!(combined[0].amount, 3.0);
    }

    #[test]
    fn test_group_by_category_sorted_and_non_empty() {
        let list = vec![
            processed("tomato", 2.0, Unit::Piece, Category::Vegetables),
            processed("Rice", 200.0, Unit::Gram, Category::Grains),
            processed("Carrot", 1.0, Unit::Piece, Category::Vegetables),
            processed("Bread", 1.0, Unit::Piece, Category::Grains),
        ];

        let groups = group_by_category(&list);

        assert_eq!(groups.len(), 2);
        assert!(groups.values().all(|bucket| !bucket.is_empty()));

        let vegetables: Vec<&str> = groups[&Category::Vegetables]
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(vegetables, vec!["Carrot", "tomato"]);

        let grains: Vec<&str> = groups[&Category::Grains].iter().map(|i| i.name.as_str()).collect();
        assert_eq!(grains, vec!["Bread", "Rice"]);

        let order: Vec<Category> = groups.keys().copied().collect();
        assert_eq!(order, vec![Category::Vegetables, Category::Grains]);
    }

    #[test]
    fn test_group_sorts_accented_and_cased_names() {
        let list = vec![
            processed("Zucchini", 1.0, Unit::Piece, Category::Vegetables),
            processed("Échalote", 2.0, Unit::Piece, Category::Vegetables),
            processed("Apple", 1.0, Unit::Piece, Category::Vegetables),
            processed("apple", 1.0, Unit::Piece, Category::Vegetables),
        ];

        let groups = group_by_category(&list);

        let names: Vec<&str> = groups[&Category::Vegetables]
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["apple", "Apple", "Échalote", "Zucchini"]);
    }

    #[test]
    fn test_compare_names_accents_break_ties() {
        assert_eq!(compare_names("cote", "côte"), Ordering::Less);
        assert_eq!(compare_names("côte", "coteau"), Ordering::Less);
        assert_eq!(compare_names("Eclair", "éclair"), Ordering::Less);
    }

    #[test]
    fn test_group_empty_input() {
        assert!(group_by_category(&[]).is_empty());
    }

    #[test]
    fn test_bilingual_classification_parity() {
        let english = process_ingredients(&[RawIngredient::new("Tomato", "3 piece")]);
        let arabic = process_ingredients(&[RawIngredient::new("طماطم", "2 piece")]);

        assert_eq!(english[0].category, Category::Vegetables);
        assert_eq!(arabic[0].category, Category::Vegetables);

        // Different names never combine across languages.
        let combined = combine_ingredients(&[english, arabic]);
        assert_eq!(combined.len(), 2);
    }
}
