//! Savings display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::services::SavingsSummary;

#[derive(Tabled)]
struct SavingsRow {
    #[tabled(rename = "Account")]
    name: String,
    #[tabled(rename = "Type")]
    account_type: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Saved this month")]
    saved: String,
    #[tabled(rename = "Goal")]
    goal: String,
    #[tabled(rename = "Progress")]
    progress: String,
}

pub fn format_savings_summary(summary: &SavingsSummary, symbol: &str) -> String {
    let mut output = String::new();

    if summary.accounts.is_empty() {
        output.push_str("No savings or investment accounts.\n");
    } else {
        let rows = summary.accounts.iter().map(|a| SavingsRow {
            name: a.account.name.clone(),
            account_type: a.account.account_type.to_string(),
            balance: a.account.balance.format_with_symbol(symbol),
            saved: a.saved_this_month.format_with_symbol(symbol),
            goal: a
                .goal
                .map(|g| g.format_with_symbol(symbol))
                .unwrap_or_default(),
            progress: format!("{:.1}%", a.progress_percent),
        });
        output.push_str(&Table::new(rows).with(Style::psql()).to_string());
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format!(
        "Saved this month: {} of {} target ({:.1}%)\n",
        summary.total_saved_this_month.format_with_symbol(symbol),
        summary.monthly_savings_target.format_with_symbol(symbol),
        summary.goal_progress
    ));

    if !summary.recorded_flows.by_account.is_empty() {
        output.push_str(&format!(
            "Recorded deposits: {}\n",
            summary.recorded_flows.total.format_with_symbol(symbol)
        ));
    }

    output
}
