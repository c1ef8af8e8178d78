//! In-memory collaborators for engine tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use futures::channel::oneshot;

use crate::error::{BudgetlineError, BudgetlineResult};
use crate::models::{Account, AccountId, Budget, Category, IncomeSettings, Money, PeriodWindow, Transaction};
use crate::storage::{BudgetStore, Ledger, SavingsForPeriod};

#[derive(Default)]
pub struct FakeLedger {
    pub transactions: Mutex<Vec<Transaction>>,
    pub accounts: Mutex<Vec<Account>>,
    pub opening_balances: Mutex<HashMap<AccountId, Money>>,
    pub spend_calls: AtomicUsize,
    pub fail: AtomicBool,
    /// When set, the next income fetch waits on this and reports `gated_income`
    pub gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub gated_income: Mutex<Money>,
}

impl FakeLedger {
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
            ..Self::default()
        }
    }

    pub fn add_account(&self, account: Account, opening_balance: Money) {
        self.opening_balances
            .lock()
            .unwrap()
            .insert(account.id, opening_balance);
        self.accounts.lock().unwrap().push(account);
    }

    pub fn hold_next_income(&self, gate: oneshot::Receiver<()>, income: Money) {
        *self.gate.lock().unwrap() = Some(gate);
        *self.gated_income.lock().unwrap() = income;
    }

    fn check(&self) -> BudgetlineResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BudgetlineError::fetch("ledger unavailable"));
        }
        Ok(())
    }

    fn sum<F>(&self, start: NaiveDateTime, end: NaiveDateTime, value: F) -> Money
    where
        F: Fn(&Transaction) -> Option<Money>,
    {
        let window = PeriodWindow::new(start, end);
        self.transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| window.contains_date(t.date))
            .filter_map(value)
            .sum()
    }
}

#[async_trait]
impl Ledger for FakeLedger {
    async fn fetch_spend(
        &self,
        categories: &[String],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BudgetlineResult<Money> {
        self.spend_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.sum(start, end, |t| {
            t.is_in_any_category(categories).then(|| t.amount.abs())
        }))
    }

    async fn fetch_income_for_period(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BudgetlineResult<Money> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
            return Ok(*self.gated_income.lock().unwrap());
        }
        self.check()?;
        Ok(self.sum(start, end, |t| t.is_in_category("Income").then_some(t.amount)))
    }

    async fn fetch_savings_for_period(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> BudgetlineResult<SavingsForPeriod> {
        self.check()?;
        let accounts = self.accounts.lock().unwrap().clone();
        let mut savings = SavingsForPeriod::default();
        for account in accounts.into_iter().filter(|a| a.account_type.is_savings_like()) {
            let flow = self.sum(start, end, |t| (t.account_id == Some(account.id)).then_some(t.amount));
            savings.total += flow;
            savings.by_account.insert(account.name, flow);
        }
        Ok(savings)
    }

    async fn fetch_balance_at(
        &self,
        account_id: AccountId,
        _instant: NaiveDateTime,
    ) -> BudgetlineResult<Money> {
        self.check()?;
        self.opening_balances
            .lock()
            .unwrap()
            .get(&account_id)
            .copied()
            .ok_or_else(|| BudgetlineError::account_not_found(account_id.to_string()))
    }

    async fn load_accounts(&self) -> BudgetlineResult<Vec<Account>> {
        self.check()?;
        Ok(self.accounts.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct FakeStore {
    pub budgets: Mutex<Vec<Budget>>,
    pub categories: Mutex<Vec<Category>>,
    pub income: Mutex<IncomeSettings>,
    pub fail: AtomicBool,
}

impl FakeStore {
    pub fn new(budgets: Vec<Budget>, categories: Vec<Category>, income: IncomeSettings) -> Self {
        Self {
            budgets: Mutex::new(budgets),
            categories: Mutex::new(categories),
            income: Mutex::new(income),
            fail: AtomicBool::new(false),
        }
    }

    fn check(&self) -> BudgetlineResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BudgetlineError::fetch("store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetStore for FakeStore {
    async fn load_budgets(&self) -> BudgetlineResult<Vec<Budget>> {
        self.check()?;
        Ok(self.budgets.lock().unwrap().clone())
    }

    async fn load_categories(&self) -> BudgetlineResult<Vec<Category>> {
        self.check()?;
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn load_income_settings(&self) -> BudgetlineResult<IncomeSettings> {
        self.check()?;
        Ok(self.income.lock().unwrap().clone())
    }
}
