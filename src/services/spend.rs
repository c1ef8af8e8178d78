//! Spend aggregator

use crate::error::BudgetlineResult;
use crate::models::{BudgetId, Category, Money, PeriodWindow};
use crate::storage::Ledger;

/// Names of the categories currently owned by `budget_id`
pub fn assigned_category_names(budget_id: BudgetId, categories: &[Category]) -> Vec<String> {
    categories
        .iter()
        .filter(|c| c.is_assigned_to(budget_id))
        .map(|c| c.name.clone())
        .collect()
}

/// Total spent in `categories` within `window`
///
/// A budget with no categories has spent nothing, so the ledger is not asked.
pub async fn aggregate(
    ledger: &dyn Ledger,
    categories: &[String],
    window: PeriodWindow,
) -> BudgetlineResult<Money> {
    if categories.is_empty() {
        return Ok(Money::zero());
    }

    let spent = ledger.fetch_spend(categories, window.start, window.end).await?;
    Ok(spent.abs())
}

/// `spent` as a percentage of `limit`; zero when there is no limit
pub fn percentage_used(spent: Money, limit: Money) -> f64 {
    Money::ratio_percent(spent, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigned_category_names() {
        let food = BudgetId::new();
        let mut groceries = Category::new("Groceries");
        groceries.assign_to(food);
        let mut rent = Category::new("Rent");
        rent.assign_to(BudgetId::new());
        let loose = Category::new("Misc");

        let names = assigned_category_names(food, &[groceries, rent, loose]);
        assert_eq!(names, vec!["Groceries".to_string()]);
    }

    #[test]
    fn test_percentage_used_guards_zero_limit() {
        let used = percentage_used(Money::from_units(50), Money::zero());
        assert_eq!(used, 0.0);
        assert!(used.is_finite());

        assert_eq!(
            percentage_used(Money::from_units(50), Money::from_units(200)),
            25.0
        );
    }

    #[test]
    fn test_percentage_used_monotonic_in_spent() {
        let limit = Money::from_units(300);
        let mut previous = 0.0;
        for cents in (0..=60_000).step_by(1_250) {
            let used = percentage_used(Money::from_cents(cents), limit);
            assert!(used >= previous);
            previous = used;
        }
    }
}
