//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod budget;
pub mod category;
pub mod income;
pub mod savings;
pub mod transaction;

use std::sync::Arc;

use chrono::NaiveDate;

pub use account::{handle_account_command, AccountCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use savings::handle_savings_command;
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{BudgetlineError, BudgetlineResult};
use crate::models::Money;
use crate::services::{Clock, RefreshEngine, RefreshOutcome, Snapshot, SystemClock};
use crate::storage::Storage;

pub(crate) fn parse_money(input: &str, what: &str) -> BudgetlineResult<Money> {
    Money::parse(input).map_err(|e| {
        BudgetlineError::Validation(format!(
            "Invalid {} '{}'. Use a format like '1000.00' or '1000'. Error: {}",
            what, input, e
        ))
    })
}

pub(crate) fn parse_date(input: &str) -> BudgetlineResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetlineError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", input))
    })
}

/// Parse an optional `--date` argument, defaulting to today
pub(crate) fn date_or_today(input: Option<&str>) -> BudgetlineResult<NaiveDate> {
    match input {
        Some(d) => parse_date(d),
        None => Ok(SystemClock.today()),
    }
}

/// Run one refresh against the local store
pub(crate) async fn refresh_snapshot(storage: &Arc<Storage>) -> BudgetlineResult<Arc<Snapshot>> {
    let engine = RefreshEngine::new(storage.clone(), storage.clone(), Arc::new(SystemClock));
    match engine.refresh().await? {
        RefreshOutcome::Applied(snapshot) => Ok(snapshot),
        RefreshOutcome::Superseded => Err(BudgetlineError::fetch(
            "refresh was superseded before it finished",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money_error_mentions_field() {
        let err = parse_money("abc", "balance").unwrap_err();
        assert!(err.to_string().contains("balance"));
        assert_eq!(parse_money("12.50", "amount").unwrap(), Money::from_cents(1250));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(parse_date("15/01/2024").unwrap_err().is_validation());
        assert_eq!(
            date_or_today(Some("2024-01-15")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(date_or_today(Some("soon")).is_err());
    }
}
