//! Category service
//!
//! Category CRUD plus budget ownership. A category belongs to at most one
//! budget; assigning it elsewhere moves it.

use crate::error::{BudgetlineError, BudgetlineResult};
use crate::models::{BudgetId, Category, CategoryId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, name: &str) -> BudgetlineResult<Category> {
        let name = name.trim();
        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(BudgetlineError::duplicate("Category", name.to_string()));
        }

        let category = Category::new(name);
        category
            .validate()
            .map_err(|e| BudgetlineError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        log::info!("created category '{}'", category.name);
        Ok(category)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> BudgetlineResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(None)
    }

    pub fn require(&self, identifier: &str) -> BudgetlineResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| BudgetlineError::category_not_found(identifier))
    }

    pub fn list(&self) -> BudgetlineResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    pub fn remove(&self, id: CategoryId) -> BudgetlineResult<Category> {
        let category = self.get(id)?;
        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        log::info!("removed category '{}'", category.name);
        Ok(category)
    }

    /// Give a category to a budget, taking it from any previous owner
    pub fn assign(&self, id: CategoryId, budget_id: BudgetId) -> BudgetlineResult<Category> {
        let budget = self
            .storage
            .budgets
            .get(budget_id)?
            .ok_or_else(|| BudgetlineError::budget_not_found(budget_id.to_string()))?;

        let mut category = self.get(id)?;
        if let Some(previous) = category.budget_id.filter(|b| *b != budget_id) {
            log::info!(
                "moving category '{}' from budget {} to '{}'",
                category.name,
                previous,
                budget.name
            );
        }
        category.assign_to(budget_id);

        self.save(category)
    }

    pub fn unassign(&self, id: CategoryId) -> BudgetlineResult<Category> {
        let mut category = self.get(id)?;
        category.unassign();
        self.save(category)
    }

    /// Set or clear the category's own percentage-of-income budget
    pub fn set_percentage(&self, id: CategoryId, percentage: Option<f64>) -> BudgetlineResult<Category> {
        let mut category = self.get(id)?;
        category.set_budget_percentage(percentage);
        category
            .validate()
            .map_err(|e| BudgetlineError::Validation(e.to_string()))?;
        self.save(category)
    }

    fn get(&self, id: CategoryId) -> BudgetlineResult<Category> {
        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| BudgetlineError::category_not_found(id.to_string()))
    }

    fn save(&self, category: Category) -> BudgetlineResult<Category> {
        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;
        Ok(category)
    }
}
