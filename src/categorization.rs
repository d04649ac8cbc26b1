//! Ingredient categorization for shopping list grouping.
//!
//! Maps an ingredient display name, English or Arabic, to a grocery category.
//! The lookup table is an ordered list: exact matches are tried first, then a
//! bidirectional substring scan returns the first entry whose keyword contains
//! the name or is contained in it. Entries are ordered so that the more
//! specific keyword of an overlapping pair ("eggplant" before "egg",
//! "زيتون" before "زيت") is reached first.

use crate::ingredient_model::Category;
use lazy_static::lazy_static;
use log::trace;

lazy_static! {
    /// Keyword table in match order, keywords already lowercase
    pub static ref CATEGORY_KEYWORDS: Vec<(&'static str, Category)> = vec![
        // Vegetables
        ("tomato", Category::Vegetables),
        ("طماطم", Category::Vegetables),
        ("بندورة", Category::Vegetables),
        ("onion", Category::Vegetables),
        ("بصل", Category::Vegetables),
        ("garlic", Category::Vegetables),
        ("ثوم", Category::Vegetables),
        ("potato", Category::Vegetables),
        ("بطاطس", Category::Vegetables),
        ("بطاطا", Category::Vegetables),
        ("carrot", Category::Vegetables),
        ("جزر", Category::Vegetables),
        ("cucumber", Category::Vegetables),
        ("خيار", Category::Vegetables),
        ("eggplant", Category::Vegetables),
        ("باذنجان", Category::Vegetables),
        ("bell pepper", Category::Vegetables),
        ("فلفل رومي", Category::Vegetables),
        ("فلفل حلو", Category::Vegetables),
        ("zucchini", Category::Vegetables),
        ("كوسة", Category::Vegetables),
        ("spinach", Category::Vegetables),
        ("سبانخ", Category::Vegetables),
        ("lettuce", Category::Vegetables),
        ("خس", Category::Vegetables),
        ("cabbage", Category::Vegetables),
        ("ملفوف", Category::Vegetables),
        ("olive", Category::Vegetables),
        ("زيتون", Category::Vegetables),
        ("lemon", Category::Vegetables),
        ("ليمون", Category::Vegetables),
        ("parsley", Category::Vegetables),
        ("بقدونس", Category::Vegetables),
        ("coriander", Category::Vegetables),
        ("كزبرة", Category::Vegetables),
        ("mint", Category::Vegetables),
        ("نعناع", Category::Vegetables),
        ("okra", Category::Vegetables),
        ("بامية", Category::Vegetables),
        // Meat
        ("chicken", Category::Meat),
        ("دجاج", Category::Meat),
        ("فراخ", Category::Meat),
        ("beef", Category::Meat),
        ("لحم بقري", Category::Meat),
        ("lamb", Category::Meat),
        ("لحم ضأن", Category::Meat),
        ("meat", Category::Meat),
        ("لحم", Category::Meat),
        ("fish", Category::Meat),
        ("سمك", Category::Meat),
        ("shrimp", Category::Meat),
        ("جمبري", Category::Meat),
        ("روبيان", Category::Meat),
        ("turkey", Category::Meat),
        ("ديك رومي", Category::Meat),
        // Dairy
        ("milk", Category::Dairy),
        ("حليب", Category::Dairy),
        ("لبن", Category::Dairy),
        ("cheese", Category::Dairy),
        ("جبن", Category::Dairy),
        ("جبنة", Category::Dairy),
        ("butter", Category::Dairy),
        ("زبدة", Category::Dairy),
        ("yogurt", Category::Dairy),
        ("زبادي", Category::Dairy),
        ("cream", Category::Dairy),
        ("قشطة", Category::Dairy),
        ("كريمة", Category::Dairy),
        ("egg", Category::Dairy),
        ("بيض", Category::Dairy),
        // Grains
        ("rice", Category::Grains),
        ("أرز", Category::Grains),
        ("ارز", Category::Grains),
        ("رز", Category::Grains),
        ("flour", Category::Grains),
        ("دقيق", Category::Grains),
        ("طحين", Category::Grains),
        ("pasta", Category::Grains),
        ("مكرونة", Category::Grains),
        ("معكرونة", Category::Grains),
        ("bread", Category::Grains),
        ("خبز", Category::Grains),
        ("عيش", Category::Grains),
        ("bulgur", Category::Grains),
        ("برغل", Category::Grains),
        ("oats", Category::Grains),
        ("شوفان", Category::Grains),
        ("lentil", Category::Grains),
        ("عدس", Category::Grains),
        // Spices
        ("salt", Category::Spices),
        ("ملح", Category::Spices),
        ("pepper", Category::Spices),
        ("فلفل", Category::Spices),
        ("cumin", Category::Spices),
        ("كمون", Category::Spices),
        ("cinnamon", Category::Spices),
        ("قرفة", Category::Spices),
        ("turmeric", Category::Spices),
        ("كركم", Category::Spices),
        ("paprika", Category::Spices),
        ("بابريكا", Category::Spices),
        ("cardamom", Category::Spices),
        ("هيل", Category::Spices),
        ("حبهان", Category::Spices),
        ("sugar", Category::Spices),
        ("سكر", Category::Spices),
        ("spice", Category::Spices),
        ("بهارات", Category::Spices),
        // Oils
        ("olive oil", Category::Oils),
        ("زيت زيتون", Category::Oils),
        ("oil", Category::Oils),
        ("زيت", Category::Oils),
        ("ghee", Category::Oils),
        ("سمن", Category::Oils),
    ];
}

/// Categorize an ingredient by name.
///
/// Matching is case-insensitive and ignores surrounding whitespace. A blank
/// name, or one matching no keyword, is `Other`.
///
/// # Examples
///
/// ```rust
/// use recipes::categorization::classify;
/// use recipes::ingredient_model::Category;
///
/// assert_eq!(classify(" TOMATO "), Category::Vegetables);
/// assert_eq!(classify("طماطم"), Category::Vegetables);
/// assert_eq!(classify("unobtainium"), Category::Other);
/// ```
pub fn classify(name: &str) -> Category {
    let lower = name.trim().to_lowercase();
    if lower.is_empty() {
        return Category::Other;
    }

    if let Some((_, category)) = CATEGORY_KEYWORDS.iter().find(|(keyword, _)| *keyword == lower) {
        return *category;
    }

    let found = CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword) || keyword.contains(lower.as_str()));

    match found {
        Some((keyword, category)) => {
            trace!("Classified '{}' as {} via keyword '{}'", name, category, keyword);
            *category
        }
        None => Category::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matches() {
        assert_eq!(classify("tomato"), Category::Vegetables);
        assert_eq!(classify("chicken"), Category::Meat);
        assert_eq!(classify("milk"), Category::Dairy);
        assert_eq!(classify("rice"), Category::Grains);
        assert_eq!(classify("salt"), Category::Spices);
        assert_eq!(classify("oil"), Category::Oils);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(classify("tomato"), classify("Tomato"));
        assert_eq!(classify("Tomato"), classify(" TOMATO "));
    }

    #[test]
    fn test_substring_matches() {
        assert_eq!(classify("Cherry tomatoes"), Category::Vegetables);
        assert_eq!(classify("Chicken breast"), Category::Meat);
        assert_eq!(classify("دقيق القمح"), Category::Grains);
        // keyword contains the name
        assert_eq!(classify("zucchin"), Category::Vegetables);
    }

    #[test]
    fn test_table_order_decides_overlaps() {
        assert_eq!(classify("eggplant"), Category::Vegetables);
        assert_eq!(classify("eggs"), Category::Dairy);
        assert_eq!(classify("red bell pepper"), Category::Vegetables);
        assert_eq!(classify("black pepper"), Category::Spices);
        assert_eq!(classify("زيتون أسود"), Category::Vegetables);
        assert_eq!(classify("زيت نباتي"), Category::Oils);
    }

    #[test]
    fn test_exact_match_wins_over_earlier_substring() {
        // "olive oil" contains "olive", which comes first, but the exact entry is tried before the scan
        assert_eq!(classify("olive oil"), Category::Oils);
        assert_eq!(classify("زيت زيتون"), Category::Oils);
    }

    #[test]
    fn test_unknown_and_blank() {
        assert_eq!(classify("xyzfoobar123"), Category::Other);
        assert_eq!(classify(""), Category::Other);
        assert_eq!(classify("   "), Category::Other);
    }

    #[test]
    fn test_always_a_known_category() {
        for name in ["Tomato", "طماطم", "Saffron threads", "?", "1234", "ماء"] {
            assert!(Category::ALL.contains(&classify(name)));
        }
    }
}
