//! Path management for budgetline
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGETLINE_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory (`~/.config/budgetline` on Linux,
//!    `~/Library/Application Support/budgetline` on macOS, `%APPDATA%\budgetline` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::BudgetlineError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BUDGETLINE_DATA_DIR";

/// Manages all paths used by budgetline
#[derive(Debug, Clone)]
pub struct BudgetlinePaths {
    base_dir: PathBuf,
}

impl BudgetlinePaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BudgetlineError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the JSON stores
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Income settings singleton (dynamic toggle, manual income, savings target)
    pub fn income_file(&self) -> PathBuf {
        self.data_dir().join("income.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BudgetlineError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            BudgetlineError::Io(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            BudgetlineError::Io(format!("Failed to create data directory: {}", e))
        })?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, BudgetlineError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| BudgetlineError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("budgetline"))
}
