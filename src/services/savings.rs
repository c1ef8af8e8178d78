//! Savings goal tracker
//!
//! "Saved this month" is the change in an account's balance since the start
//! of the calendar month. Withdrawals make it negative and it is reported
//! that way.

use chrono::NaiveDateTime;
use futures::future::try_join_all;

use crate::error::BudgetlineResult;
use crate::models::{Account, IncomeSettings, Money};
use crate::services::period::current_month;
use crate::storage::{Ledger, SavingsForPeriod};

/// Progress of `saved` toward `goal`, capped at 100 but never floored
pub fn progress_percent(saved: Money, goal: Money) -> f64 {
    if goal.is_positive() {
        Money::ratio_percent(saved, goal).min(100.0)
    } else {
        0.0
    }
}

/// Savings figures for one savings or investment account
#[derive(Debug, Clone)]
pub struct AccountSavingsBreakdown {
    pub account: Account,
    pub saved_this_month: Money,
    pub goal: Option<Money>,
    pub progress_percent: f64,
}

impl AccountSavingsBreakdown {
    pub fn new(account: Account, balance_at_month_start: Money) -> Self {
        let saved_this_month = account.balance - balance_at_month_start;
        let goal = account.monthly_savings_goal;
        let progress_percent = progress_percent(saved_this_month, goal.unwrap_or_default());

        Self {
            account,
            saved_this_month,
            goal,
            progress_percent,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SavingsSummary {
    pub accounts: Vec<AccountSavingsBreakdown>,
    pub total_saved_this_month: Money,
    pub monthly_savings_target: Money,
    /// Progress of the total toward the monthly target
    pub goal_progress: f64,
    /// Transactions recorded against savings accounts this month
    pub recorded_flows: SavingsForPeriod,
}

impl SavingsSummary {
    pub fn new(
        accounts: Vec<AccountSavingsBreakdown>,
        monthly_savings_target: Money,
        recorded_flows: SavingsForPeriod,
    ) -> Self {
        let total_saved_this_month: Money = accounts.iter().map(|a| a.saved_this_month).sum();

        Self {
            goal_progress: progress_percent(total_saved_this_month, monthly_savings_target),
            accounts,
            total_saved_this_month,
            monthly_savings_target,
            recorded_flows,
        }
    }
}

/// Compute savings progress for every savings-like account
pub async fn track(
    ledger: &dyn Ledger,
    income_settings: &IncomeSettings,
    now: NaiveDateTime,
) -> BudgetlineResult<SavingsSummary> {
    let month = current_month(now);
    let accounts: Vec<Account> = ledger
        .load_accounts()
        .await?
        .into_iter()
        .filter(|a| a.account_type.is_savings_like())
        .collect();

    let openings = try_join_all(
        accounts
            .iter()
            .map(|a| ledger.fetch_balance_at(a.id, month.start)),
    );
    let (openings, flows) = tokio::try_join!(
        openings,
        ledger.fetch_savings_for_period(month.start, month.end)
    )?;

    let breakdowns = accounts
        .into_iter()
        .zip(openings)
        .map(|(account, opening)| AccountSavingsBreakdown::new(account, opening))
        .collect();

    let summary = SavingsSummary::new(breakdowns, income_settings.monthly_savings_target, flows);
    log::debug!(
        "saved {} this month toward {} ({:.1}%)",
        summary.total_saved_this_month,
        summary.monthly_savings_target,
        summary.goal_progress
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Transaction};
    use crate::services::fakes::FakeLedger;
    use chrono::NaiveDate;

    fn savings_account(name: &str, balance: i64, goal: Option<i64>) -> Account {
        let mut account = Account::with_balance(name, AccountType::Savings, Money::from_units(balance));
        account.set_monthly_savings_goal(goal.map(Money::from_units));
        account
    }

    #[test]
    fn test_saved_this_month_against_goal() {
        let account = savings_account("Rainy Day", 1800, Some(500));
        let breakdown = AccountSavingsBreakdown::new(account, Money::from_units(1500));
        assert_eq!(breakdown.saved_this_month, Money::from_units(300));
        assert_eq!(breakdown.progress_percent, 60.0);
    }

    #[test]
    fn test_progress_capped_at_100() {
        let account = savings_account("Rainy Day", 3000, Some(500));
        let breakdown = AccountSavingsBreakdown::new(account, Money::from_units(1500));
        assert_eq!(breakdown.progress_percent, 100.0);
    }

    #[test]
    fn test_withdrawal_is_negative() {
        let account = savings_account("Rainy Day", 1300, Some(500));
        let breakdown = AccountSavingsBreakdown::new(account, Money::from_units(1500));
        assert_eq!(breakdown.saved_this_month, Money::from_units(-200));
        assert_eq!(breakdown.progress_percent, -40.0);
    }

    #[test]
    fn test_no_goal_reports_zero() {
        let account = savings_account("Rainy Day", 1800, None);
        let breakdown = AccountSavingsBreakdown::new(account, Money::from_units(1500));
        assert_eq!(breakdown.progress_percent, 0.0);
        assert!(breakdown.goal.is_none());
    }

    #[test]
    fn test_summary_goal_progress() {
        let accounts = vec![
            AccountSavingsBreakdown::new(savings_account("A", 1800, None), Money::from_units(1500)),
            AccountSavingsBreakdown::new(savings_account("B", 900, None), Money::from_units(1000)),
        ];
        let summary = SavingsSummary::new(accounts, Money::from_units(400), SavingsForPeriod::default());
        assert_eq!(summary.total_saved_this_month, Money::from_units(200));
        assert_eq!(summary.goal_progress, 50.0);

        let none = SavingsSummary::new(Vec::new(), Money::zero(), SavingsForPeriod::default());
        assert_eq!(none.goal_progress, 0.0);
    }

    #[tokio::test]
    async fn test_track_skips_spending_accounts() {
        let ledger = FakeLedger::default();
        let rainy = savings_account("Rainy Day", 1800, Some(500));
        let rainy_id = rainy.id;
        ledger.add_account(rainy, Money::from_units(1500));
        ledger.add_account(
            Account::with_balance("Brokerage", AccountType::Investment, Money::from_units(10_000)),
            Money::from_units(10_200),
        );
        ledger.add_account(
            Account::with_balance("Checking", AccountType::Checking, Money::from_units(50)),
            Money::from_units(2000),
        );
        ledger.transactions.lock().unwrap().push(
            Transaction::new(NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(), Money::from_units(300))
                .on_account(rainy_id),
        );

        let mut settings = IncomeSettings::default();
        settings.set_monthly_savings_target(Money::from_units(1000));
        let now = NaiveDate::from_ymd_opt(2025, 3, 20)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        let summary = track(&ledger, &settings, now).await.unwrap();
        assert_eq!(summary.accounts.len(), 2);
        assert_eq!(summary.total_saved_this_month, Money::from_units(100));
        assert_eq!(summary.goal_progress, 10.0);
        assert_eq!(summary.recorded_flows.total, Money::from_units(300));
    }
}
