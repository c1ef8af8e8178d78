//! Budget service
//!
//! Creating, editing, ordering and removing budgets. Every change that
//! touches the list leaves `sort_order` as the dense sequence `0..n`.

use chrono::NaiveDate;

use crate::error::{BudgetlineError, BudgetlineResult};
use crate::models::{Budget, BudgetAmount, BudgetId, Category, PeriodType};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a budget at `position` (appended when `None`)
    pub fn create(&self, budget: Budget, position: Option<usize>) -> BudgetlineResult<Budget> {
        let mut budget = budget;
        budget.name = budget.name.trim().to_string();
        budget
            .validate()
            .map_err(|e| BudgetlineError::Validation(e.to_string()))?;

        if self.storage.budgets.name_exists(&budget.name, None)? {
            return Err(BudgetlineError::duplicate("Budget", budget.name));
        }

        let budget = self.storage.budgets.insert(budget, position)?;
        self.storage.budgets.save()?;

        log::info!("created budget '{}' at position {}", budget.name, budget.sort_order);
        Ok(budget)
    }

    /// Find a budget by name or ID string
    pub fn find(&self, identifier: &str) -> BudgetlineResult<Option<Budget>> {
        if let Some(budget) = self.storage.budgets.get_by_name(identifier)? {
            return Ok(Some(budget));
        }

        if let Ok(id) = identifier.parse::<BudgetId>() {
            return self.storage.budgets.get(id);
        }

        Ok(None)
    }

    /// Like [`find`](Self::find), but a missing budget is an error
    pub fn require(&self, identifier: &str) -> BudgetlineResult<Budget> {
        self.find(identifier)?
            .ok_or_else(|| BudgetlineError::budget_not_found(identifier))
    }

    /// All budgets in display order
    pub fn list(&self) -> BudgetlineResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Categories currently assigned to a budget
    pub fn categories(&self, id: BudgetId) -> BudgetlineResult<Vec<Category>> {
        self.storage.categories.assigned_to(id)
    }

    pub fn update_amount(&self, id: BudgetId, amount: BudgetAmount) -> BudgetlineResult<Budget> {
        self.update(id, |budget| budget.set_amount(amount))
    }

    pub fn update_period(
        &self,
        id: BudgetId,
        period_type: PeriodType,
        custom_start_date: Option<NaiveDate>,
        custom_end_date: Option<NaiveDate>,
    ) -> BudgetlineResult<Budget> {
        self.update(id, |budget| {
            budget.set_period(period_type, custom_start_date, custom_end_date)
        })
    }

    fn update<F>(&self, id: BudgetId, edit: F) -> BudgetlineResult<Budget>
    where
        F: FnOnce(&mut Budget),
    {
        let mut budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| BudgetlineError::budget_not_found(id.to_string()))?;

        edit(&mut budget);
        budget
            .validate()
            .map_err(|e| BudgetlineError::Validation(e.to_string()))?;

        self.storage.budgets.update(budget.clone())?;
        self.storage.budgets.save()?;

        log::info!("updated budget '{}'", budget.name);
        Ok(budget)
    }

    /// Delete a budget, releasing its categories
    pub fn remove(&self, id: BudgetId) -> BudgetlineResult<Budget> {
        let budget = self
            .storage
            .budgets
            .remove(id)?
            .ok_or_else(|| BudgetlineError::budget_not_found(id.to_string()))?;

        let released = self.storage.categories.unassign_budget(id)?;
        self.storage.categories.save()?;
        self.storage.budgets.save()?;

        log::info!(
            "removed budget '{}', released {} categories",
            budget.name,
            released
        );
        Ok(budget)
    }

    /// Move a budget to `position` (clamped to the end of the list)
    pub fn move_to(&self, id: BudgetId, position: usize) -> BudgetlineResult<Vec<Budget>> {
        self.storage.budgets.move_to(id, position)?;
        self.storage.budgets.save()?;
        self.storage.budgets.get_all()
    }
}
