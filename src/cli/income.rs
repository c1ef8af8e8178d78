//! Income CLI commands

use clap::Subcommand;

use super::parse_money;
use crate::config::settings::Settings;
use crate::error::BudgetlineResult;
use crate::services::income::{fetch_dynamic_income, IncomeBreakdown};
use crate::services::{Clock, IncomeService, IncomeUpdate, SystemClock};
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Show income settings and this month's recorded income
    Show,
    /// Change income settings
    Set {
        /// Follow income recorded this month (true) or the manual figure (false)
        #[arg(long)]
        dynamic: Option<bool>,
        /// Manually entered monthly income
        #[arg(long)]
        manual: Option<String>,
        /// Overall monthly savings target
        #[arg(long)]
        savings_target: Option<String>,
    },
}

/// Handle an income command
pub async fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> BudgetlineResult<()> {
    let service = IncomeService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    let income = match cmd {
        IncomeCommands::Show => service.get()?,
        IncomeCommands::Set {
            dynamic,
            manual,
            savings_target,
        } => service.update(IncomeUpdate {
            use_dynamic_income: dynamic,
            manual_income: manual.as_deref().map(|m| parse_money(m, "income")).transpose()?,
            monthly_savings_target: savings_target
                .as_deref()
                .map(|t| parse_money(t, "savings target"))
                .transpose()?,
        })?,
    };

    let dynamic = fetch_dynamic_income(storage, SystemClock.now()).await?;
    let breakdown = IncomeBreakdown::new(&income, dynamic);

    println!(
        "Income source:          {}",
        if income.use_dynamic_income { "dynamic" } else { "manual" }
    );
    println!(
        "Recorded this month:    {} (category '{}')",
        breakdown.dynamic_income.format_with_symbol(symbol),
        storage.income_category()
    );
    println!(
        "Manual income:          {}",
        income.manual_income.format_with_symbol(symbol)
    );
    println!(
        "Effective income:       {}",
        breakdown.effective().format_with_symbol(symbol)
    );
    println!(
        "Monthly savings target: {}",
        income.monthly_savings_target.format_with_symbol(symbol)
    );

    Ok(())
}
