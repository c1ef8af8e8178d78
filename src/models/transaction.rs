//! Transaction model
//!
//! Ledger entries. Amounts are signed: negative for outflows, positive for
//! inflows. Spending is measured by absolute value, so the sign convention
//! only matters for balances and income.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// A single ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Account the money moved in or out of
    #[serde(default)]
    pub account_id: Option<AccountId>,

    pub date: NaiveDate,

    pub amount: Money,

    /// Category name this transaction is tagged with
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub memo: String,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self {
            id: TransactionId::new(),
            account_id: None,
            date,
            amount,
            category: None,
            memo: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder: tag with a category
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder: post to an account
    pub fn on_account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Case-insensitive category match
    pub fn is_in_category(&self, name: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(name))
    }

    /// True if the category matches any of `names`
    pub fn is_in_any_category(&self, names: &[String]) -> bool {
        names.iter().any(|n| self.is_in_category(n))
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.amount,
            self.category.as_deref().unwrap_or("(uncategorized)")
        )
    }
}
