//! Account service
//!
//! Accounts, their monthly savings goals, and the transactions recorded
//! against them. Recording a transaction on an account moves its balance.

use chrono::NaiveDate;

use crate::error::{BudgetlineError, BudgetlineResult};
use crate::models::{Account, AccountId, AccountType, Money, Transaction};
use crate::storage::Storage;

/// Memo on transactions created by [`AccountService::set_balance`]
pub const BALANCE_ADJUSTMENT_MEMO: &str = "Balance adjustment";

/// Service for account and transaction management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        name: &str,
        account_type: AccountType,
        balance: Money,
    ) -> BudgetlineResult<Account> {
        let name = name.trim();
        if self.storage.accounts.get_by_name(name)?.is_some() {
            return Err(BudgetlineError::duplicate("Account", name.to_string()));
        }

        let account = Account::with_balance(name, account_type, balance);
        account
            .validate()
            .map_err(|e| BudgetlineError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        log::info!("created {} account '{}'", account.account_type, account.name);
        Ok(account)
    }

    /// Find an account by name or ID string
    pub fn find(&self, identifier: &str) -> BudgetlineResult<Option<Account>> {
        if let Some(account) = self.storage.accounts.get_by_name(identifier)? {
            return Ok(Some(account));
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            return self.storage.accounts.get(id);
        }

        Ok(None)
    }

    pub fn require(&self, identifier: &str) -> BudgetlineResult<Account> {
        self.find(identifier)?
            .ok_or_else(|| BudgetlineError::account_not_found(identifier))
    }

    pub fn list(&self) -> BudgetlineResult<Vec<Account>> {
        self.storage.accounts.get_all()
    }

    /// Bring an account to `balance` by recording the difference on `date`
    /// as an uncategorized transaction
    pub fn set_balance(
        &self,
        id: AccountId,
        balance: Money,
        date: NaiveDate,
    ) -> BudgetlineResult<Account> {
        let account = self.get(id)?;
        let difference = balance - account.balance;
        if difference.is_zero() {
            return Ok(account);
        }

        self.add_transaction(
            Transaction::new(date, difference)
                .on_account(id)
                .with_memo(BALANCE_ADJUSTMENT_MEMO),
        )?;
        log::info!(
            "adjusted '{}' by {} to {}",
            account.name,
            difference,
            balance
        );
        self.get(id)
    }

    pub fn set_goal(&self, id: AccountId, goal: Option<Money>) -> BudgetlineResult<Account> {
        let mut account = self.get(id)?;
        account.set_monthly_savings_goal(goal);
        account
            .validate()
            .map_err(|e| BudgetlineError::Validation(e.to_string()))?;
        self.save(account)
    }

    /// Record a transaction, applying it to its account's balance
    pub fn add_transaction(&self, transaction: Transaction) -> BudgetlineResult<Transaction> {
        if transaction.amount.is_zero() {
            return Err(BudgetlineError::Validation(
                "Transaction amount cannot be zero".into(),
            ));
        }

        if let Some(account_id) = transaction.account_id {
            let mut account = self.get(account_id)?;
            account.apply(transaction.amount);
            self.storage.accounts.upsert(account)?;
            self.storage.accounts.save()?;
        }

        self.storage.transactions.insert(transaction.clone())?;
        self.storage.transactions.save()?;

        log::info!("recorded transaction {}", transaction);
        Ok(transaction)
    }

    /// Transactions newest first, optionally only those on or after `since`
    pub fn list_transactions(
        &self,
        since: Option<NaiveDate>,
        limit: Option<usize>,
    ) -> BudgetlineResult<Vec<Transaction>> {
        let transactions = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| since.map_or(true, |d| t.date >= d))
            .take(limit.unwrap_or(usize::MAX))
            .collect();
        Ok(transactions)
    }

    fn get(&self, id: AccountId) -> BudgetlineResult<Account> {
        self.storage
            .accounts
            .get(id)?
            .ok_or_else(|| BudgetlineError::account_not_found(id.to_string()))
    }

    fn save(&self, account: Account) -> BudgetlineResult<Account> {
        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;
        Ok(account)
    }
}
