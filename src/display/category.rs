//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Budget, Category};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Share of income")]
    percentage: String,
}

/// Format categories with the name of the budget that owns each one
pub fn format_category_list(categories: &[Category], budgets: &[Budget]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        name: c.name.clone(),
        budget: c
            .budget_id
            .and_then(|id| budgets.iter().find(|b| b.id == id))
            .map(|b| b.name.clone())
            .unwrap_or_else(|| "-".to_string()),
        percentage: c
            .budget_percentage
            .map(|p| format!("{}%", p))
            .unwrap_or_default(),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetAmount, Money};

    #[test]
    fn test_owner_and_percentage() {
        let food = Budget::new("Food", BudgetAmount::Fixed(Money::from_units(400)));
        let mut groceries = Category::new("Groceries");
        groceries.assign_to(food.id);
        let mut travel = Category::new("Travel");
        travel.set_budget_percentage(Some(7.5));

        let output = format_category_list(&[groceries, travel], &[food]);
        assert!(output.contains("Food"));
        assert!(output.contains("7.5%"));
    }
}
