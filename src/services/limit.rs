//! Budget limit resolver

use crate::models::{Budget, BudgetAmount, Money};

/// Spending limit of `amount` for the current period
///
/// Percentage amounts of a zero or negative income resolve to zero.
pub fn resolve_amount(amount: BudgetAmount, effective_income: Money) -> Money {
    match amount {
        BudgetAmount::Fixed(limit) => limit,
        BudgetAmount::Percentage(_) if !effective_income.is_positive() => Money::zero(),
        BudgetAmount::Percentage(pct) => effective_income.percentage(pct),
    }
}

pub fn resolve_limit(budget: &Budget, effective_income: Money) -> Money {
    resolve_amount(budget.amount, effective_income)
}
