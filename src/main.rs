use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use recipes::categorization::classify;
use recipes::config::AppConfig;
use recipes::household_model::DataFile;
use recipes::ingredient_model::{format_amount, Language};
use recipes::localization::LocalizationManager;
use recipes::store::MemStorage;
use recipes::text_processing::parse_amount;
use recipes::unit_conversion::convert_unit;

#[derive(Parser, Debug)]
#[command(name = "recipes", version, about = "Bilingual household recipe manager")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an amount such as "2 cups" or "500 جرام"
    Parse {
        amount: String,
        /// Also convert into a larger unit where a rule applies
        #[arg(long)]
        convert: bool,
    },
    /// Print the grocery category of an ingredient name
    Classify { name: String },
    /// Build a grouped shopping list from recipes in a data file
    ShoppingList {
        #[arg(long)]
        data: PathBuf,
        /// Recipe id to add; repeat for several, omit for all
        #[arg(long = "recipe")]
        recipes: Vec<u64>,
        #[arg(long)]
        lang: Option<Language>,
    },
    /// Print pantry alerts from a data file
    Pantry {
        #[arg(long)]
        data: PathBuf,
        /// Reference date, defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
        #[arg(long)]
        lang: Option<Language>,
    },
}

fn load_data_file(path: &Path) -> Result<DataFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse data file {}", path.display()))
}

fn seeded_store(path: &Path) -> Result<MemStorage> {
    let store = MemStorage::new();
    store
        .seed(load_data_file(path)?)
        .with_context(|| format!("Invalid record in {}", path.display()))?;
    Ok(store)
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let messages = LocalizationManager::with_locales_dir(&config.locales_dir)?;

    match cli.command {
        Command::Parse { amount, convert } => {
            let parsed = parse_amount(&amount);
            let (value, unit) = if convert {
                convert_unit(parsed.amount, &parsed.unit, None)
            } else {
                (parsed.amount, parsed.unit)
            };
            let amount = format_amount(value);
            println!(
                "{}",
                messages.get_message_with_args(
                    "parse-result",
                    config.language,
                    &[("amount", amount.as_str()), ("unit", unit.as_str())],
                )
            );
        }
        Command::Classify { name } => {
            let category = classify(&name);
            let heading = messages.category_heading(category, config.language);
            println!(
                "{}",
                messages.get_message_with_args(
                    "classify-result",
                    config.language,
                    &[("name", name.trim()), ("category", heading.as_str())],
                )
            );
        }
        Command::ShoppingList { data, recipes, lang } => {
            let language = lang.unwrap_or(config.language);
            let store = seeded_store(&data)?;
            let ids: Vec<u64> = if recipes.is_empty() {
                store.list_recipes().iter().map(|recipe| recipe.id).collect()
            } else {
                recipes
            };

            let added = store.add_recipes_to_shopping_list(&ids, language)?;
            info!("Shopping list built with {} item(s)", added.len());
            let recipes = ids
                .iter()
                .map(|id| store.get_recipe(*id))
                .collect::<Result<Vec<_>, _>>()?;

            println!("{}", messages.format_added_summary(added.len(), &recipes, language));
            println!();
            println!("{}", messages.get_message("shopping-list-title", language, None));
            let groups = store.grouped_shopping_list();
            if groups.is_empty() {
                println!("{}", messages.get_message("shopping-list-empty", language, None));
            }
            for (category, items) in groups {
                println!();
                println!("{}", messages.category_heading(category, language));
                for item in items {
                    println!("  {}", messages.format_shopping_line(&item, language));
                }
            }
        }
        Command::Pantry { data, today, lang } => {
            let language = lang.unwrap_or(config.language);
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let store = seeded_store(&data)?;

            let alerts = store.pantry_alerts(today, config.expiry_warning_days);
            println!("{}", messages.get_message("pantry-alerts-title", language, None));
            if alerts.is_empty() {
                println!("{}", messages.get_message("pantry-no-alerts", language, None));
            }
            for alert in &alerts {
                println!("  {}", messages.format_pantry_alert(alert, language));
            }
        }
    }

    Ok(())
}
