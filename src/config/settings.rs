//! User settings for budgetline
//!
//! Display preferences and the name of the category that counts as income.
//! Income figures themselves (manual income, savings target) live in the
//! budget store, not here.

use serde::{Deserialize, Serialize};

use super::paths::BudgetlinePaths;
use crate::error::BudgetlineError;

/// User settings for budgetline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Category whose transactions make up dynamic income
    #[serde(default = "default_income_category")]
    pub income_category: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

/// Category name counted as income unless configured otherwise
pub const DEFAULT_INCOME_CATEGORY: &str = "Income";

fn default_income_category() -> String {
    DEFAULT_INCOME_CATEGORY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            income_category: default_income_category(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetlinePaths) -> Result<Self, BudgetlineError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BudgetlineError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetlineError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetlinePaths) -> Result<(), BudgetlineError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BudgetlineError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            BudgetlineError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
