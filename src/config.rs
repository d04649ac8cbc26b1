//! # Application Configuration
//!
//! Defaults for the command-line tool, overridable through environment
//! variables (a `.env` file is honoured when present).

use crate::ingredient_model::Language;
use anyhow::{Context, Result};
use log::debug;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_LOCALES_DIR: &str = "./locales";
pub const DEFAULT_EXPIRY_WARNING_DAYS: i64 = 3;

pub const LANGUAGE_VAR: &str = "RECIPES_LANGUAGE";
pub const LOCALES_DIR_VAR: &str = "RECIPES_LOCALES_DIR";
pub const EXPIRY_WARNING_DAYS_VAR: &str = "RECIPES_EXPIRY_WARNING_DAYS";

/// Settings shared by every subcommand
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Language used when a command does not pass `--lang`
    pub language: Language,
    /// Directory holding `<lang>/main.ftl` message files
    pub locales_dir: PathBuf,
    /// Days ahead of expiry at which a pantry item is flagged
    pub expiry_warning_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::En,
            locales_dir: PathBuf::from(DEFAULT_LOCALES_DIR),
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(code) = lookup(LANGUAGE_VAR) {
            config.language = code
                .parse()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid {}", LANGUAGE_VAR))?;
        }
        if let Some(dir) = lookup(LOCALES_DIR_VAR) {
            config.locales_dir = PathBuf::from(dir);
        }
        if let Some(days) = lookup(EXPIRY_WARNING_DAYS_VAR) {
            config.expiry_warning_days = days
                .trim()
                .parse::<i64>()
                .with_context(|| format!("Invalid {}: '{}'", EXPIRY_WARNING_DAYS_VAR, days))?;
            if config.expiry_warning_days < 0 {
                anyhow::bail!("{} must not be negative", EXPIRY_WARNING_DAYS_VAR);
            }
        }

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}
