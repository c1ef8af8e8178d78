//! Income settings repository
//!
//! Holds the single `IncomeSettings` record. Every change is written to disk
//! straight away.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetlineError;
use crate::models::IncomeSettings;

use super::file_io::{read_json, write_json_atomic};

/// Repository for the income settings record
pub struct IncomeRepository {
    path: PathBuf,
    settings: RwLock<IncomeSettings>,
}

impl IncomeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            settings: RwLock::new(IncomeSettings::default()),
        }
    }

    pub fn load(&self) -> Result<(), BudgetlineError> {
        let loaded: IncomeSettings = read_json(&self.path)?;

        let mut settings = self.settings.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *settings = loaded;
        Ok(())
    }

    pub fn get(&self) -> Result<IncomeSettings, BudgetlineError> {
        let settings = self.settings.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(settings.clone())
    }

    /// Replace the record and persist it
    pub fn set(&self, updated: IncomeSettings) -> Result<(), BudgetlineError> {
        {
            let mut settings = self.settings.write().map_err(|e| {
                BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            *settings = updated;
        }
        self.save()
    }

    pub fn save(&self) -> Result<(), BudgetlineError> {
        let settings = self.get()?;
        write_json_atomic(&self.path, &settings)
    }
}
