//! Income resolver
//!
//! Chooses between income observed in the ledger this calendar month and the
//! manually entered figure. Every budget in a refresh shares the result,
//! whatever its own period.

use chrono::NaiveDateTime;

use crate::error::{BudgetlineError, BudgetlineResult};
use crate::models::{IncomeSettings, Money};
use crate::services::period::current_month;
use crate::storage::{Ledger, Storage};

/// The income figures considered during a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeBreakdown {
    /// Sum of income-category transactions in the current calendar month
    pub dynamic_income: Money,
    pub manual_income: Money,
    pub use_dynamic_income: bool,
}

impl IncomeBreakdown {
    pub fn new(settings: &IncomeSettings, dynamic_income: Money) -> Self {
        Self {
            dynamic_income,
            manual_income: settings.manual_income,
            use_dynamic_income: settings.use_dynamic_income,
        }
    }

    /// The income percentage budgets are resolved against
    pub fn effective(&self) -> Money {
        if self.use_dynamic_income {
            self.dynamic_income
        } else {
            self.manual_income
        }
    }
}

/// Pick the effective monthly income
pub fn effective_income(settings: &IncomeSettings, dynamic_income: Money) -> Money {
    IncomeBreakdown::new(settings, dynamic_income).effective()
}

/// Ask the ledger for this calendar month's income
pub async fn fetch_dynamic_income(
    ledger: &dyn Ledger,
    now: NaiveDateTime,
) -> BudgetlineResult<Money> {
    let month = current_month(now);
    let income = ledger.fetch_income_for_period(month.start, month.end).await?;
    log::debug!("dynamic income for {}: {}", month, income);
    Ok(income)
}

/// Changes to apply to the income settings; `None` leaves a field as is
#[derive(Debug, Clone, Copy, Default)]
pub struct IncomeUpdate {
    pub use_dynamic_income: Option<bool>,
    pub manual_income: Option<Money>,
    pub monthly_savings_target: Option<Money>,
}

/// Service for the income settings record
pub struct IncomeService<'a> {
    storage: &'a Storage,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn get(&self) -> BudgetlineResult<IncomeSettings> {
        self.storage.income.get()
    }

    /// Apply an update and persist it straight away
    pub fn update(&self, update: IncomeUpdate) -> BudgetlineResult<IncomeSettings> {
        let mut settings = self.storage.income.get()?;

        if let Some(dynamic) = update.use_dynamic_income {
            settings.set_use_dynamic_income(dynamic);
        }
        if let Some(amount) = update.manual_income {
            settings.set_manual_income(amount);
        }
        if let Some(amount) = update.monthly_savings_target {
            settings.set_monthly_savings_target(amount);
        }

        settings
            .validate()
            .map_err(|e| BudgetlineError::Validation(e.to_string()))?;
        self.storage.income.set(settings.clone())?;

        log::info!(
            "income settings updated (dynamic: {}, manual: {}, savings target: {})",
            settings.use_dynamic_income,
            settings.manual_income,
            settings.monthly_savings_target
        );
        Ok(settings)
    }
}
