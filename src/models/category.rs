//! Category model
//!
//! Transactions are tagged with a category name. A category can be owned by
//! at most one budget, and may carry its own percentage-of-income allocation
//! independent of any budget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};

/// A spending or income category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// Category name, matched against transaction categories
    #[serde(rename = "category_name")]
    pub name: String,

    /// The budget that owns this category, if any
    #[serde(default)]
    pub budget_id: Option<BudgetId>,

    /// Category-level allocation in percentage points of income
    #[serde(default)]
    pub budget_percentage: Option<f64>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new unassigned category
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            budget_id: None,
            budget_percentage: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Hand this category to a budget, replacing any previous owner
    pub fn assign_to(&mut self, budget_id: BudgetId) {
        self.budget_id = Some(budget_id);
        self.updated_at = Utc::now();
    }

    pub fn unassign(&mut self) {
        self.budget_id = None;
        self.updated_at = Utc::now();
    }

    pub fn is_assigned_to(&self, budget_id: BudgetId) -> bool {
        self.budget_id == Some(budget_id)
    }

    pub fn set_budget_percentage(&mut self, pct: Option<f64>) {
        self.budget_percentage = pct;
        self.updated_at = Utc::now();
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if let Some(pct) = self.budget_percentage {
            if !(0.0..=100.0).contains(&pct) {
                return Err(CategoryValidationError::PercentageOutOfRange(pct));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    PercentageOutOfRange(f64),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::PercentageOutOfRange(pct) => {
                write!(f, "Category percentage must be between 0 and 100, got {}", pct)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_is_exclusive() {
        let first = BudgetId::new();
        let second = BudgetId::new();
        let mut category = Category::new("Groceries");

        category.assign_to(first);
        assert!(category.is_assigned_to(first));

        category.assign_to(second);
        assert!(!category.is_assigned_to(first));
        assert!(category.is_assigned_to(second));

        category.unassign();
        assert!(category.budget_id.is_none());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Category::new("  ").validate(),
            Err(CategoryValidationError::EmptyName)
        );

        let mut category = Category::new("Dining");
        category.set_budget_percentage(Some(150.0));
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::PercentageOutOfRange(150.0))
        );

        category.set_budget_percentage(Some(10.0));
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_serialized_name_field() {
        let category = Category::new("Rent");
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["category_name"], "Rent");
        assert!(json["budget_id"].is_null());
    }
}
