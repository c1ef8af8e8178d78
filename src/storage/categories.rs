//! Category repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetlineError;
use crate::models::{BudgetId, Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    #[serde(default)]
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), BudgetlineError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for category in file_data.categories {
            data.insert(category.id, category);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), BudgetlineError> {
        let categories = self.get_all()?;
        write_json_atomic(&self.path, &CategoryData { categories })
    }

    /// All categories, sorted by name
    pub fn get_all(&self) -> Result<Vec<Category>, BudgetlineError> {
        let data = self.data.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by_key(|c| c.name.to_lowercase());
        Ok(list)
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, BudgetlineError> {
        let data = self.data.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, BudgetlineError> {
        let data = self.data.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Categories currently owned by a budget
    pub fn assigned_to(&self, budget_id: BudgetId) -> Result<Vec<Category>, BudgetlineError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|c| c.is_assigned_to(budget_id))
            .collect())
    }

    pub fn upsert(&self, category: Category) -> Result<(), BudgetlineError> {
        let mut data = self.data.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(category.id, category);
        Ok(())
    }

    pub fn delete(&self, id: CategoryId) -> Result<bool, BudgetlineError> {
        let mut data = self.data.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id).is_some())
    }

    /// Release every category owned by a budget; returns how many were released
    pub fn unassign_budget(&self, budget_id: BudgetId) -> Result<usize, BudgetlineError> {
        let mut data = self.data.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut released = 0;
        for category in data.values_mut().filter(|c| c.is_assigned_to(budget_id)) {
            category.unassign();
            released += 1;
        }

        Ok(released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_assigned_to_and_unassign_budget() {
        let (_temp_dir, repo) = create_repo();
        let food = BudgetId::new();
        let other = BudgetId::new();

        let mut groceries = Category::new("Groceries");
        groceries.assign_to(food);
        let mut dining = Category::new("Dining");
        dining.assign_to(food);
        let mut rent = Category::new("Rent");
        rent.assign_to(other);

        repo.upsert(groceries).unwrap();
        repo.upsert(dining).unwrap();
        repo.upsert(rent).unwrap();

        let names: Vec<_> = repo
            .assigned_to(food)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Dining", "Groceries"]);

        assert_eq!(repo.unassign_budget(food).unwrap(), 2);
        assert!(repo.assigned_to(food).unwrap().is_empty());
        assert_eq!(repo.assigned_to(other).unwrap().len(), 1);
    }

    #[test]
    fn test_get_by_name_case_insensitive() {
        let (_temp_dir, repo) = create_repo();
        repo.upsert(Category::new("Groceries")).unwrap();
        assert!(repo.get_by_name("GROCERIES").unwrap().is_some());
        assert!(repo.get_by_name("Rent").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let (temp_dir, repo) = create_repo();
        let category = Category::new("Groceries");
        let id = category.id;
        repo.upsert(category).unwrap();
        repo.save().unwrap();

        let reloaded = CategoryRepository::new(temp_dir.path().join("categories.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(id).unwrap().unwrap().name, "Groceries");

        assert!(reloaded.delete(id).unwrap());
        assert!(!reloaded.delete(id).unwrap());
    }
}
