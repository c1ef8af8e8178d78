//! Budget repository for JSON storage
//!
//! Budgets are kept as a list ordered by `sort_order`. Every insert, removal
//! or move renumbers the list so `sort_order` stays `0..n` with no gaps.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetlineError;
use crate::models::{Budget, BudgetId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<Vec<Budget>>,
}

/// Renumber `sort_order` to match list position
pub fn reindex(budgets: &mut [Budget]) {
    for (i, budget) in budgets.iter_mut().enumerate() {
        budget.sort_order = i as i32;
    }
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load budgets from disk, repairing any gaps in the ordering
    pub fn load(&self) -> Result<(), BudgetlineError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *data = file_data.budgets;
        data.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.created_at.cmp(&b.created_at)));
        reindex(&mut data);

        Ok(())
    }

    pub fn save(&self) -> Result<(), BudgetlineError> {
        let data = self.data.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = BudgetData {
            budgets: data.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// All budgets in display order
    pub fn get_all(&self) -> Result<Vec<Budget>, BudgetlineError> {
        let data = self.data.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, BudgetlineError> {
        let data = self.data.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.iter().find(|b| b.id == id).cloned())
    }

    /// Get a budget by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Budget>, BudgetlineError> {
        let data = self.data.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name_lower = name.to_lowercase();
        Ok(data
            .iter()
            .find(|b| b.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert a budget at `position` (clamped; `None` appends) and renumber
    pub fn insert(&self, budget: Budget, position: Option<usize>) -> Result<Budget, BudgetlineError> {
        let mut data = self.data.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let index = position.map_or(data.len(), |p| p.min(data.len()));
        data.insert(index, budget);
        reindex(&mut data);

        Ok(data[index].clone())
    }

    /// Replace a budget in place, keeping its position
    pub fn update(&self, budget: Budget) -> Result<(), BudgetlineError> {
        let mut data = self.data.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let slot = data
            .iter_mut()
            .find(|b| b.id == budget.id)
            .ok_or_else(|| BudgetlineError::budget_not_found(budget.id.to_string()))?;
        let sort_order = slot.sort_order;
        *slot = budget;
        slot.sort_order = sort_order;

        Ok(())
    }

    /// Remove a budget and close the gap it leaves
    pub fn remove(&self, id: BudgetId) -> Result<Option<Budget>, BudgetlineError> {
        let mut data = self.data.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let removed = data
            .iter()
            .position(|b| b.id == id)
            .map(|index| data.remove(index));
        reindex(&mut data);

        Ok(removed)
    }

    /// Move a budget to `position` (clamped) and renumber
    pub fn move_to(&self, id: BudgetId, position: usize) -> Result<(), BudgetlineError> {
        let mut data = self.data.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let from = data
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BudgetlineError::budget_not_found(id.to_string()))?;
        let budget = data.remove(from);
        let to = position.min(data.len());
        data.insert(to, budget);
        reindex(&mut data);

        Ok(())
    }

    pub fn name_exists(&self, name: &str, exclude_id: Option<BudgetId>) -> Result<bool, BudgetlineError> {
        let data = self.data.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name_lower = name.to_lowercase();
        Ok(data
            .iter()
            .any(|b| b.name.to_lowercase() == name_lower && Some(b.id) != exclude_id))
    }
}
