//! Service layer for budgetline
//!
//! The engine (period, income, limit, spend, allocation, savings and the
//! refresh cycle) derives read models from collaborator data. The remaining
//! services apply validated edits to the JSON store.

pub mod account;
pub mod allocation;
pub mod budget;
pub mod category;
pub mod clock;
pub mod income;
pub mod limit;
pub mod period;
pub mod refresh;
pub mod savings;
pub mod spend;

#[cfg(test)]
pub(crate) mod fakes;

pub use account::AccountService;
pub use allocation::{AllocationSummary, BudgetStatus, BudgetWithSpent, CategoryAllocation};
pub use budget::BudgetService;
pub use category::CategoryService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use income::{IncomeBreakdown, IncomeService, IncomeUpdate};
pub use period::resolve_period;
pub use refresh::{RefreshEngine, RefreshOutcome, Snapshot};
pub use savings::{AccountSavingsBreakdown, SavingsSummary};
