//! Savings CLI command

use std::sync::Arc;

use super::refresh_snapshot;
use crate::config::settings::Settings;
use crate::display::savings::format_savings_summary;
use crate::error::BudgetlineResult;
use crate::storage::Storage;

/// Print this month's savings per account and against the overall target
pub async fn handle_savings_command(storage: &Arc<Storage>, settings: &Settings) -> BudgetlineResult<()> {
    let snapshot = refresh_snapshot(storage).await?;
    print!(
        "{}",
        format_savings_summary(&snapshot.savings, &settings.currency_symbol)
    );
    Ok(())
}
