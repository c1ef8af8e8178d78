//! Core data models for budgetline
//!
//! Persisted records (budgets, categories, accounts, transactions, income
//! settings) and the value types they are built from.

pub mod account;
pub mod budget;
pub mod category;
pub mod ids;
pub mod income;
pub mod money;
pub mod period;
pub mod transaction;

pub use account::{Account, AccountType};
pub use budget::{AmountType, Budget, BudgetAmount};
pub use category::Category;
pub use ids::{AccountId, BudgetId, CategoryId, TransactionId};
pub use income::IncomeSettings;
pub use money::Money;
pub use period::{PeriodType, PeriodWindow};
pub use transaction::Transaction;
