//! Configuration module for budgetline
//!
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BudgetlinePaths;
pub use settings::Settings;
