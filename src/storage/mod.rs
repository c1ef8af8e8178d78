//! Storage layer for budgetline
//!
//! The engine reads its inputs through two collaborator traits: a [`Ledger`]
//! (transactions and account balances) and a [`BudgetStore`] (budget,
//! category and income records). [`Storage`] implements both over JSON files
//! with atomic writes.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod file_io;
pub mod income;
pub mod transactions;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;

pub use accounts::AccountRepository;
pub use budgets::{reindex, BudgetRepository};
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use income::IncomeRepository;
pub use transactions::TransactionRepository;

use crate::config::paths::BudgetlinePaths;
use crate::config::settings::DEFAULT_INCOME_CATEGORY;
use crate::error::{BudgetlineError, BudgetlineResult};
use crate::models::{Account, AccountId, Budget, Category, IncomeSettings, Money, PeriodWindow};

/// Signed flows into savings-like accounts over a window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavingsForPeriod {
    pub total: Money,
    /// Keyed by account name
    pub by_account: BTreeMap<String, Money>,
}

/// Source of transactions and account balances
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Sum of absolute amounts in `categories` within `[start, end)`
    async fn fetch_spend(
        &self,
        categories: &[String],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BudgetlineResult<Money>;

    /// Sum of income-category transactions within `[start, end)`
    async fn fetch_income_for_period(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BudgetlineResult<Money>;

    async fn fetch_savings_for_period(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BudgetlineResult<SavingsForPeriod>;

    /// Balance the account held at `instant`
    async fn fetch_balance_at(
        &self,
        account_id: AccountId,
        instant: NaiveDateTime,
    ) -> BudgetlineResult<Money>;

    async fn load_accounts(&self) -> BudgetlineResult<Vec<Account>>;
}

/// Source of budget, category and income records
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Budgets ordered by `sort_order`
    async fn load_budgets(&self) -> BudgetlineResult<Vec<Budget>>;

    async fn load_categories(&self) -> BudgetlineResult<Vec<Category>>;

    async fn load_income_settings(&self) -> BudgetlineResult<IncomeSettings>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BudgetlinePaths,
    income_category: String,
    pub budgets: BudgetRepository,
    pub categories: CategoryRepository,
    pub accounts: AccountRepository,
    pub transactions: TransactionRepository,
    pub income: IncomeRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetlinePaths) -> Result<Self, BudgetlineError> {
        paths.ensure_directories()?;

        Ok(Self {
            income_category: DEFAULT_INCOME_CATEGORY.to_string(),
            budgets: BudgetRepository::new(paths.budgets_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            accounts: AccountRepository::new(paths.accounts_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            income: IncomeRepository::new(paths.income_file()),
            paths,
        })
    }

    /// Category whose transactions count as income
    pub fn with_income_category(mut self, category: impl Into<String>) -> Self {
        self.income_category = category.into();
        self
    }

    /// Directories and files this storage reads and writes
    pub fn paths(&self) -> &BudgetlinePaths {
        &self.paths
    }

    pub fn income_category(&self) -> &str {
        &self.income_category
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), BudgetlineError> {
        self.budgets.load()?;
        self.categories.load()?;
        self.accounts.load()?;
        self.transactions.load()?;
        self.income.load()?;
        Ok(())
    }
}

#[async_trait]
impl Ledger for Storage {
    async fn fetch_spend(
        &self,
        categories: &[String],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BudgetlineResult<Money> {
        self.transactions
            .spend_in(categories, PeriodWindow::new(start, end))
    }

    async fn fetch_income_for_period(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BudgetlineResult<Money> {
        self.transactions
            .total_in(&self.income_category, PeriodWindow::new(start, end))
    }

    async fn fetch_savings_for_period(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BudgetlineResult<SavingsForPeriod> {
        let window = PeriodWindow::new(start, end);
        let mut savings = SavingsForPeriod::default();

        for account in self.accounts.savings_like()? {
            let flow = self.transactions.account_flow(account.id, window)?;
            savings.total += flow;
            *savings.by_account.entry(account.name).or_default() += flow;
        }

        Ok(savings)
    }

    async fn fetch_balance_at(
        &self,
        account_id: AccountId,
        instant: NaiveDateTime,
    ) -> BudgetlineResult<Money> {
        let account = self
            .accounts
            .get(account_id)?
            .ok_or_else(|| BudgetlineError::account_not_found(account_id.to_string()))?;

        let since = PeriodWindow::new(instant, NaiveDateTime::MAX);
        let moved = self.transactions.account_flow(account_id, since)?;
        Ok(account.balance - moved)
    }

    async fn load_accounts(&self) -> BudgetlineResult<Vec<Account>> {
        self.accounts.get_all()
    }
}

#[async_trait]
impl BudgetStore for Storage {
    async fn load_budgets(&self) -> BudgetlineResult<Vec<Budget>> {
        self.budgets.get_all()
    }

    async fn load_categories(&self) -> BudgetlineResult<Vec<Category>> {
        self.categories.get_all()
    }

    async fn load_income_settings(&self) -> BudgetlineResult<IncomeSettings> {
        self.income.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(0, 0, 0).unwrap()
    }

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetlinePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_storage();
        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.income_category(), "Income");
    }

    #[tokio::test]
    async fn test_balance_at_month_start() {
        let (_temp_dir, storage) = create_storage();
        let account = Account::with_balance("Rainy Day", AccountType::Savings, Money::from_units(1800));
        let id = account.id;
        storage.accounts.upsert(account).unwrap();

        storage
            .transactions
            .insert(Transaction::new(date(2025, 3, 1), Money::from_units(500)).on_account(id))
            .unwrap();
        storage
            .transactions
            .insert(Transaction::new(date(2025, 3, 12), Money::from_units(-200)).on_account(id))
            .unwrap();
        storage
            .transactions
            .insert(Transaction::new(date(2025, 2, 27), Money::from_units(75)).on_account(id))
            .unwrap();

        let opening = storage.fetch_balance_at(id, midnight(2025, 3, 1)).await.unwrap();
        assert_eq!(opening, Money::from_units(1500));
    }

    #[tokio::test]
    async fn test_balance_at_unknown_account() {
        let (_temp_dir, storage) = create_storage();
        let err = storage
            .fetch_balance_at(AccountId::new(), midnight(2025, 3, 1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_income_uses_configured_category() {
        let (_temp_dir, storage) = create_storage();
        let storage = storage.with_income_category("Salary");
        storage
            .transactions
            .insert(Transaction::new(date(2025, 3, 5), Money::from_units(4000)).in_category("Salary"))
            .unwrap();
        storage
            .transactions
            .insert(Transaction::new(date(2025, 3, 5), Money::from_units(900)).in_category("Income"))
            .unwrap();

        let income = storage
            .fetch_income_for_period(midnight(2025, 3, 1), midnight(2025, 4, 1))
            .await
            .unwrap();
        assert_eq!(income, Money::from_units(4000));
    }

    #[tokio::test]
    async fn test_savings_for_period_only_counts_savings_accounts() {
        let (_temp_dir, storage) = create_storage();
        let savings = Account::new("Rainy Day", AccountType::Savings);
        let brokerage = Account::new("Brokerage", AccountType::Investment);
        let checking = Account::new("Checking", AccountType::Checking);
        for (account, amount) in [(&savings, 300), (&brokerage, 150), (&checking, -40)] {
            storage
                .transactions
                .insert(
                    Transaction::new(date(2025, 3, 10), Money::from_units(amount)).on_account(account.id),
                )
                .unwrap();
        }
        storage.accounts.upsert(savings).unwrap();
        storage.accounts.upsert(brokerage).unwrap();
        storage.accounts.upsert(checking).unwrap();

        let result = storage
            .fetch_savings_for_period(midnight(2025, 3, 1), midnight(2025, 4, 1))
            .await
            .unwrap();
        assert_eq!(result.total, Money::from_units(450));
        assert_eq!(result.by_account.len(), 2);
        assert_eq!(result.by_account["Rainy Day"], Money::from_units(300));
    }

    #[test]
    fn test_save_and_load_all() {
        let (temp_dir, storage) = create_storage();
        storage.categories.upsert(Category::new("Groceries")).unwrap();
        storage.categories.save().unwrap();
        assert!(storage.paths().categories_file().exists());

        let paths = BudgetlinePaths::with_base_dir(temp_dir.path().to_path_buf());
        let reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.categories.get_all().unwrap().len(), 1);
    }
}
