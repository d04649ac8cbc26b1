//! # Localization Module
//!
//! Loads Fluent message bundles for English and Arabic and renders the
//! user-facing strings of the command-line tool: category headings,
//! shopping-list lines and pantry alerts.
//!
//! Bundles are read from `<locales_dir>/<lang>/main.ftl`. When the file is
//! missing the copy compiled into the binary is used instead.

use crate::household_model::{PantryAlert, Recipe, ShoppingListItem};
use crate::ingredient_model::{format_amount, Category, Language};
use anyhow::{Context, Result};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use unic_langid::LanguageIdentifier;

const EMBEDDED_EN: &str = include_str!("../locales/en/main.ftl");
const EMBEDDED_AR: &str = include_str!("../locales/ar/main.ftl");

/// Localization manager for the recipe tool
pub struct LocalizationManager {
    bundles: HashMap<Language, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a localization manager reading from `./locales`
    pub fn new() -> Result<Self> {
        Self::with_locales_dir(crate::config::DEFAULT_LOCALES_DIR)
    }

    /// Create a localization manager reading from `locales_dir`
    pub fn with_locales_dir(locales_dir: impl AsRef<Path>) -> Result<Self> {
        let locales_dir = locales_dir.as_ref();
        let mut bundles = HashMap::new();

        for language in [Language::En, Language::Ar] {
            let bundle = Self::create_bundle(locales_dir, language)?;
            bundles.insert(language, bundle);
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific language
    fn create_bundle(locales_dir: &Path, language: Language) -> Result<FluentBundle<FluentResource>> {
        let locale: LanguageIdentifier = language
            .code()
            .parse()
            .with_context(|| format!("Invalid locale identifier '{}'", language))?;
        let mut bundle = FluentBundle::new(vec![locale]);
        // Plain text for terminal output, no bidi isolation marks
        bundle.set_use_isolating(false);

        let resource_path = locales_dir.join(language.code()).join("main.ftl");
        let content = match fs::read_to_string(&resource_path) {
            Ok(content) => content,
            Err(e) => {
                debug!(
                    "Using embedded messages for '{}' ({}: {})",
                    language,
                    resource_path.display(),
                    e
                );
                match language {
                    Language::En => EMBEDDED_EN.to_string(),
                    Language::Ar => EMBEDDED_AR.to_string(),
                }
            }
        };

        let resource = match FluentResource::try_new(content) {
            Ok(resource) => resource,
            Err((resource, errors)) => {
                warn!(
                    "{} syntax error(s) in messages for '{}', keeping valid entries",
                    errors.len(),
                    language
                );
                resource
            }
        };
        if let Err(errors) = bundle.add_resource(resource) {
            warn!("Duplicate messages for '{}': {:?}", language, errors);
        }

        Ok(bundle)
    }

    fn bundle(&self, language: Language) -> Option<&FluentBundle<FluentResource>> {
        self.bundles
            .get(&language)
            .or_else(|| self.bundles.get(&Language::En))
    }

    /// Whether `key` has a message for `language`
    pub fn has_message(&self, key: &str, language: Language) -> bool {
        self.bundle(language)
            .is_some_and(|bundle| bundle.has_message(key))
    }

    /// Get a localized message
    pub fn get_message(
        &self,
        key: &str,
        language: Language,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let Some(bundle) = self.bundle(language) else {
            return format!("Missing translation: {}", key);
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let fluent_args = args.map(|args| {
            FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))))
        });

        let mut value = String::new();
        let mut errors = vec![];
        if let Err(e) = bundle.write_pattern(&mut value, pattern, fluent_args.as_ref(), &mut errors)
        {
            warn!("Failed to format message '{}': {}", key, e);
        }
        if !errors.is_empty() {
            debug!("Message '{}' formatted with {} error(s)", key, errors.len());
        }

        value
    }

    /// Get a localized message for a language code; unknown codes use English
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        self.get_message(key, detect_language(Some(language)), args)
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(
        &self,
        key: &str,
        language: Language,
        args: &[(&str, &str)],
    ) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message(key, language, Some(&args_map))
    }

    /// Heading shown above a category bucket
    pub fn category_heading(&self, category: Category, language: Language) -> String {
        self.get_message(&format!("category-{}", category.as_str()), language, None)
    }

    /// Localized display name of a unit, or the unit text itself
    pub fn unit_label(&self, unit: &str, language: Language) -> String {
        let key = format!("unit-{}", unit);
        if self.has_message(&key, language) {
            self.get_message(&key, language, None)
        } else {
            unit.to_string()
        }
    }

    /// One shopping-list line, e.g. "[ ] 1.1 kg Flour"
    pub fn format_shopping_line(&self, item: &ShoppingListItem, language: Language) -> String {
        let unit = self.unit_label(&item.unit, language);
        let mark = if item.checked { "x" } else { " " };
        self.get_message_with_args(
            "shopping-line",
            language,
            &[
                ("mark", mark),
                ("quantity", item.quantity.as_str()),
                ("unit", unit.as_str()),
                ("name", item.name.as_str()),
            ],
        )
    }

    /// Summary printed after recipes are added to the shopping list
    ///
    /// Recipes are named by their title in `language`.
    pub fn format_added_summary(
        &self,
        added: usize,
        recipes: &[Recipe],
        language: Language,
    ) -> String {
        let count = added.to_string();
        let separator = match language {
            Language::En => ", ",
            Language::Ar => "، ",
        };
        let titles = recipes
            .iter()
            .map(|recipe| recipe.title_for(language))
            .collect::<Vec<_>>()
            .join(separator);
        self.get_message_with_args(
            "shopping-added",
            language,
            &[("count", count.as_str()), ("recipes", titles.as_str())],
        )
    }

    /// One pantry alert line
    pub fn format_pantry_alert(&self, alert: &PantryAlert, language: Language) -> String {
        let item = alert.item();
        match alert {
            PantryAlert::LowStock { .. } => {
                let quantity = format_amount(item.quantity);
                let unit = self.unit_label(item.unit.as_str(), language);
                self.get_message_with_args(
                    "pantry-low-stock",
                    language,
                    &[
                        ("name", item.name.as_str()),
                        ("quantity", quantity.as_str()),
                        ("unit", unit.as_str()),
                    ],
                )
            }
            PantryAlert::Expired { .. } => {
                let date = item
                    .expiry_date
                    .map(|date| date.to_string())
                    .unwrap_or_default();
                self.get_message_with_args(
                    "pantry-expired",
                    language,
                    &[("name", item.name.as_str()), ("date", date.as_str())],
                )
            }
            PantryAlert::ExpiringSoon { days_left, .. } => {
                let days = days_left.to_string();
                self.get_message_with_args(
                    "pantry-expiring-soon",
                    language,
                    &[("name", item.name.as_str()), ("days", days.as_str())],
                )
            }
        }
    }
}

/// Resolve a language code, falling back to English
pub fn detect_language(code: Option<&str>) -> Language {
    code.and_then(Language::from_code).unwrap_or_default()
}
