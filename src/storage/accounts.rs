//! Account repository for JSON storage
//!
//! Accounts are kept in memory keyed by id and written out as a single
//! `accounts.json` document.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BudgetlineError;
use crate::models::{Account, AccountId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of `accounts.json`
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountFile {
    #[serde(default)]
    accounts: Vec<Account>,
}

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<HashMap<AccountId, Account>>,
}

impl AccountRepository {
    /// Create an empty repository backed by `path`; call [`load`](Self::load) to read it
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<AccountId, Account>>, BudgetlineError> {
        self.data.read().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire account read lock: {}", e))
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<AccountId, Account>>, BudgetlineError> {
        self.data.write().map_err(|e| {
            BudgetlineError::Storage(format!("Failed to acquire account write lock: {}", e))
        })
    }

    /// Replace the in-memory accounts with the contents of the file
    ///
    /// A missing file loads as no accounts.
    pub fn load(&self) -> Result<(), BudgetlineError> {
        let file: AccountFile = read_json(&self.path)?;
        let mut data = self.write()?;
        *data = file.accounts.into_iter().map(|a| (a.id, a)).collect();
        log::debug!("loaded {} accounts from {}", data.len(), self.path.display());
        Ok(())
    }

    /// Write every account to disk atomically
    pub fn save(&self) -> Result<(), BudgetlineError> {
        let accounts = self.get_all()?;
        write_json_atomic(&self.path, &AccountFile { accounts })
    }

    /// Look up an account by id
    pub fn get(&self, id: AccountId) -> Result<Option<Account>, BudgetlineError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All accounts, sorted by name
    pub fn get_all(&self) -> Result<Vec<Account>, BudgetlineError> {
        let mut accounts: Vec<_> = self.read()?.values().cloned().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accounts)
    }

    /// Savings and investment accounts, sorted by name
    pub fn savings_like(&self) -> Result<Vec<Account>, BudgetlineError> {
        let mut accounts = self.get_all()?;
        accounts.retain(|a| a.account_type.is_savings_like());
        Ok(accounts)
    }

    /// Look up an account by name, ignoring case
    pub fn get_by_name(&self, name: &str) -> Result<Option<Account>, BudgetlineError> {
        Ok(self
            .read()?
            .values()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Insert a new account or replace the one with the same id
    pub fn upsert(&self, account: Account) -> Result<(), BudgetlineError> {
        self.write()?.insert(account.id, account);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Money};
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.json");

        let repo = AccountRepository::new(path.clone());
        let account = Account::with_balance("Savings", AccountType::Savings, Money::from_units(1500));
        let id = account.id;
        repo.upsert(account).unwrap();
        repo.save().unwrap();

        let reloaded = AccountRepository::new(path);
        reloaded.load().unwrap();
        let account = reloaded.get(id).unwrap().unwrap();
        assert_eq!(account.balance, Money::from_units(1500));
        assert!(reloaded.get_by_name("savings").unwrap().is_some());
    }

    #[test]
    fn test_get_all_sorted_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AccountRepository::new(temp_dir.path().join("accounts.json"));
        repo.upsert(Account::new("Savings", AccountType::Savings)).unwrap();
        repo.upsert(Account::new("Checking", AccountType::Checking)).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Checking", "Savings"]);
    }

    #[test]
    fn test_savings_like_filters_spending_accounts() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AccountRepository::new(temp_dir.path().join("accounts.json"));
        repo.upsert(Account::new("Savings", AccountType::Savings)).unwrap();
        repo.upsert(Account::new("Brokerage", AccountType::Investment)).unwrap();
        repo.upsert(Account::new("Checking", AccountType::Checking)).unwrap();

        let names: Vec<_> = repo
            .savings_like()
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Brokerage", "Savings"]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AccountRepository::new(temp_dir.path().join("accounts.json"));
        repo.load().unwrap();
        assert!(repo.get_all().unwrap().is_empty());
    }
}
