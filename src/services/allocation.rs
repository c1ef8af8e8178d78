//! Allocation calculator
//!
//! Composes the period, income, limit and spend resolvers into one annotated
//! view per budget, plus the portfolio totals shown alongside them. Each
//! budget is computed independently; all ledger fetches for a pass run
//! concurrently and are joined before anything is returned.

use std::fmt;

use chrono::NaiveDateTime;
use futures::future::try_join_all;

use crate::error::BudgetlineResult;
use crate::models::{Budget, BudgetAmount, Category, IncomeSettings, Money, PeriodWindow};
use crate::services::income::{fetch_dynamic_income, IncomeBreakdown};
use crate::services::limit::{resolve_amount, resolve_limit};
use crate::services::period::{current_month, resolve_period};
use crate::services::spend::{aggregate, assigned_category_names, percentage_used};
use crate::storage::Ledger;

/// How far through its limit a budget is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Over,
}

impl BudgetStatus {
    pub const WARNING_THRESHOLD: f64 = 80.0;
    pub const OVER_THRESHOLD: f64 = 100.0;

    pub fn classify(percentage_used: f64) -> Self {
        if percentage_used >= Self::OVER_THRESHOLD {
            Self::Over
        } else if percentage_used >= Self::WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "on-track"),
            Self::Warning => write!(f, "warning"),
            Self::Over => write!(f, "over"),
        }
    }
}

/// A budget annotated with its current period's figures
#[derive(Debug, Clone)]
pub struct BudgetWithSpent {
    pub budget: Budget,
    /// Categories assigned to the budget when the figures were computed
    pub categories: Vec<Category>,
    pub window: PeriodWindow,
    pub spent: Money,
    pub limit: Money,
    pub percentage_used: f64,
    pub status: BudgetStatus,
}

impl BudgetWithSpent {
    pub fn new(
        budget: Budget,
        categories: Vec<Category>,
        window: PeriodWindow,
        spent: Money,
        effective_income: Money,
    ) -> Self {
        let limit = resolve_limit(&budget, effective_income);
        let percentage_used = percentage_used(spent, limit);
        log::debug!(
            "budget '{}' {}: spent {} of {} ({:.1}%)",
            budget.name,
            window,
            spent,
            limit,
            percentage_used
        );

        Self {
            budget,
            categories,
            window,
            spent,
            limit,
            percentage_used,
            status: BudgetStatus::classify(percentage_used),
        }
    }

    /// Limit left to spend; negative once over
    pub fn remaining(&self) -> Money {
        self.limit - self.spent
    }
}

/// A category budgeted directly as a percentage of income
#[derive(Debug, Clone)]
pub struct CategoryAllocation {
    pub category: Category,
    pub percentage: f64,
    pub limit: Money,
    /// Spent in the current calendar month
    pub spent: Money,
    pub percentage_used: f64,
    pub status: BudgetStatus,
}

impl CategoryAllocation {
    pub fn new(category: Category, percentage: f64, spent: Money, effective_income: Money) -> Self {
        let limit = resolve_amount(BudgetAmount::Percentage(percentage), effective_income);
        let percentage_used = percentage_used(spent, limit);

        Self {
            category,
            percentage,
            limit,
            spent,
            percentage_used,
            status: BudgetStatus::classify(percentage_used),
        }
    }
}

/// Result of one allocation pass
#[derive(Debug, Clone)]
pub struct AllocationSummary {
    pub budgets: Vec<BudgetWithSpent>,
    pub category_allocations: Vec<CategoryAllocation>,
    /// Percentage points committed by percentage-type budgets only
    pub total_allocated_percentage: f64,
    /// Resolved limits of every budget
    pub total_allocated_currency: Money,
    pub unallocated_percentage: f64,
    pub total_spent: Money,
    pub effective_income: Money,
    pub income: IncomeBreakdown,
}

impl AllocationSummary {
    /// Derive the portfolio totals for a set of annotated budgets
    pub fn new(
        budgets: Vec<BudgetWithSpent>,
        category_allocations: Vec<CategoryAllocation>,
        income: IncomeBreakdown,
    ) -> Self {
        let effective_income = income.effective();

        let total_allocated_percentage: f64 = budgets
            .iter()
            .filter_map(|b| b.budget.amount.percentage_points())
            .sum();
        let total_allocated_currency: Money = budgets.iter().map(|b| b.limit).sum();
        let total_spent: Money = budgets.iter().map(|b| b.spent).sum();

        let unallocated_percentage = if effective_income.is_positive() {
            (100.0 - Money::ratio_percent(total_allocated_currency, effective_income)).max(0.0)
        } else {
            0.0
        };

        Self {
            budgets,
            category_allocations,
            total_allocated_percentage,
            total_allocated_currency,
            unallocated_percentage,
            total_spent,
            effective_income,
            income,
        }
    }

    /// Budgets at or past the warning threshold
    pub fn needing_attention(&self) -> impl Iterator<Item = &BudgetWithSpent> {
        self.budgets
            .iter()
            .filter(|b| b.status != BudgetStatus::OnTrack)
    }
}

/// Run one allocation pass against the ledger
///
/// Dynamic income is fetched even when manual income is selected so both
/// figures can be reported.
pub async fn calculate(
    ledger: &dyn Ledger,
    budgets: &[Budget],
    categories: &[Category],
    income_settings: &IncomeSettings,
    now: NaiveDateTime,
) -> BudgetlineResult<AllocationSummary> {
    let plans: Vec<(PeriodWindow, Vec<String>)> = budgets
        .iter()
        .map(|b| (resolve_period(b, now), assigned_category_names(b.id, categories)))
        .collect();

    let month = current_month(now);
    let direct: Vec<(&Category, f64, Vec<String>)> = categories
        .iter()
        .filter_map(|c| c.budget_percentage.map(|pct| (c, pct, vec![c.name.clone()])))
        .collect();

    let budget_spends = try_join_all(
        plans
            .iter()
            .map(|(window, names)| aggregate(ledger, names, *window)),
    );
    let category_spends = try_join_all(
        direct
            .iter()
            .map(|(_, _, names)| aggregate(ledger, names, month)),
    );

    let (dynamic_income, budget_spent, category_spent) = tokio::try_join!(
        fetch_dynamic_income(ledger, now),
        budget_spends,
        category_spends
    )?;

    let income = IncomeBreakdown::new(income_settings, dynamic_income);
    let effective_income = income.effective();

    let annotated = budgets
        .iter()
        .zip(plans)
        .zip(budget_spent)
        .map(|((budget, (window, _)), spent)| {
            let owned = categories
                .iter()
                .filter(|c| c.is_assigned_to(budget.id))
                .cloned()
                .collect();
            BudgetWithSpent::new(budget.clone(), owned, window, spent, effective_income)
        })
        .collect();

    let allocations = direct
        .into_iter()
        .zip(category_spent)
        .map(|((category, pct, _), spent)| {
            CategoryAllocation::new(category.clone(), pct, spent, effective_income)
        })
        .collect();

    Ok(AllocationSummary::new(annotated, allocations, income))
}
