//! Transaction repository for JSON storage
//!
//! Besides persistence this answers the aggregate queries the ledger
//! exposes: spend per category set, income, and signed flows per account.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetlineError;
use crate::models::{AccountId, Money, PeriodWindow, Transaction};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), BudgetlineError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *data = file_data.transactions;
        Ok(())
    }

    pub fn save(&self) -> Result<(), BudgetlineError> {
        let data = self.data.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions = data.clone();
        transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    pub fn insert(&self, transaction: Transaction) -> Result<(), BudgetlineError> {
        let mut data = self.data.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.push(transaction);
        Ok(())
    }

    /// All transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, BudgetlineError> {
        let data = self.data.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut list = data.clone();
        list.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(list)
    }

    /// Sum over transactions dated inside `window` that pass `filter`
    fn sum_in_window<F, V>(&self, window: PeriodWindow, filter: F, value: V) -> Result<Money, BudgetlineError>
    where
        F: Fn(&Transaction) -> bool,
        V: Fn(&Transaction) -> Money,
    {
        let data = self.data.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .iter()
            .filter(|t| window.contains_date(t.date) && filter(t))
            .map(value)
            .sum())
    }

    /// Sum of absolute amounts in any of `categories`
    pub fn spend_in(&self, categories: &[String], window: PeriodWindow) -> Result<Money, BudgetlineError> {
        if categories.is_empty() {
            return Ok(Money::zero());
        }
        self.sum_in_window(window, |t| t.is_in_any_category(categories), |t| t.amount.abs())
    }

    /// Signed sum of amounts in `category`
    pub fn total_in(&self, category: &str, window: PeriodWindow) -> Result<Money, BudgetlineError> {
        self.sum_in_window(window, |t| t.is_in_category(category), |t| t.amount)
    }

    /// Signed sum of an account's transactions inside `window`
    pub fn account_flow(&self, account_id: AccountId, window: PeriodWindow) -> Result<Money, BudgetlineError> {
        self.sum_in_window(window, |t| t.account_id == Some(account_id), |t| t.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> PeriodWindow {
        PeriodWindow::from_dates(date(2025, 1, 1), date(2025, 2, 1))
    }

    fn create_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_spend_uses_absolute_amounts_within_window() {
        let (_temp_dir, repo) = create_repo();
        repo.insert(Transaction::new(date(2025, 1, 3), Money::from_units(-40)).in_category("Groceries"))
            .unwrap();
        // refund still counts toward activity
        repo.insert(Transaction::new(date(2025, 1, 9), Money::from_units(10)).in_category("groceries"))
            .unwrap();
        repo.insert(Transaction::new(date(2025, 1, 9), Money::from_units(-25)).in_category("Dining"))
            .unwrap();
        repo.insert(Transaction::new(date(2025, 2, 1), Money::from_units(-99)).in_category("Groceries"))
            .unwrap();

        let spent = repo.spend_in(&["Groceries".into()], january()).unwrap();
        assert_eq!(spent, Money::from_units(50));

        let both = repo
            .spend_in(&["Groceries".into(), "Dining".into()], january())
            .unwrap();
        assert_eq!(both, Money::from_units(75));

        assert_eq!(repo.spend_in(&[], january()).unwrap(), Money::zero());
    }

    #[test]
    fn test_total_in_is_signed() {
        let (_temp_dir, repo) = create_repo();
        repo.insert(Transaction::new(date(2025, 1, 1), Money::from_units(3000)).in_category("Income"))
            .unwrap();
        repo.insert(Transaction::new(date(2025, 1, 15), Money::from_units(3000)).in_category("Income"))
            .unwrap();
        repo.insert(Transaction::new(date(2025, 1, 20), Money::from_units(-200)).in_category("Income"))
            .unwrap();

        assert_eq!(repo.total_in("Income", january()).unwrap(), Money::from_units(5800));
    }

    #[test]
    fn test_account_flow() {
        let (_temp_dir, repo) = create_repo();
        let savings = AccountId::new();
        repo.insert(Transaction::new(date(2025, 1, 2), Money::from_units(500)).on_account(savings))
            .unwrap();
        repo.insert(Transaction::new(date(2025, 1, 20), Money::from_units(-200)).on_account(savings))
            .unwrap();
        repo.insert(Transaction::new(date(2025, 1, 20), Money::from_units(-70)).on_account(AccountId::new()))
            .unwrap();

        assert_eq!(repo.account_flow(savings, january()).unwrap(), Money::from_units(300));
    }

    #[test]
    fn test_save_and_load_round_trip_order() {
        let (temp_dir, repo) = create_repo();
        repo.insert(Transaction::new(date(2025, 1, 9), Money::from_units(-1))).unwrap();
        repo.insert(Transaction::new(date(2025, 1, 2), Money::from_units(-2))).unwrap();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        reloaded.load().unwrap();
        let all = reloaded.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].date, date(2025, 1, 9));
    }
}
