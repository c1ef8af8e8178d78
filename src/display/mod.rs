//! Display formatting for terminal output
//!
//! Every formatter returns a `String` built with `tabled`; printing is left
//! to the CLI handlers.

pub mod account;
pub mod budget;
pub mod category;
pub mod savings;

pub use account::{format_account_list, format_transaction_list};
pub use budget::{format_amount, format_budget_list, format_budget_status};
pub use category::format_category_list;
pub use savings::format_savings_summary;
