//! budgetline - budget periods and allocations from the terminal
//!
//! This library tracks spending budgets against the categories assigned to
//! them. A budget's limit is either a fixed amount or a share of monthly
//! income, and its spending window is weekly, calendar-monthly or a custom
//! cycle that repeats from its first definition. Savings and investment
//! accounts are tracked against monthly savings goals.
//!
//! # Architecture
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Budgets, categories, accounts, transactions, income settings
//! - `storage`: `Ledger` and `BudgetStore` collaborators and their JSON implementation
//! - `services`: The allocation engine, the refresh cycle and store edits
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use budgetline::config::BudgetlinePaths;
//! use budgetline::services::{RefreshEngine, SystemClock};
//! use budgetline::storage::Storage;
//!
//! let storage = Arc::new(Storage::new(BudgetlinePaths::new()?)?);
//! storage.load_all()?;
//! let engine = RefreshEngine::new(storage.clone(), storage, Arc::new(SystemClock));
//! engine.refresh().await?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BudgetlineError, BudgetlineResult};
