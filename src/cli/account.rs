//! Account CLI commands

use clap::Subcommand;

use super::{date_or_today, parse_money};
use crate::config::settings::Settings;
use crate::display::account::format_account_list;
use crate::error::{BudgetlineError, BudgetlineResult};
use crate::models::AccountType;
use crate::services::AccountService;
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create an account
    Add {
        /// Account name
        name: String,
        /// Account type (checking, savings, credit, investment, other)
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Current balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        balance: String,
    },
    /// List accounts
    List,
    /// Set an account's balance, recording the difference as an adjustment
    Balance {
        /// Account name or ID
        account: String,
        /// New balance
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Adjustment date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Set a monthly savings goal; omit the amount to clear it
    Goal {
        /// Account name or ID
        account: String,
        /// Amount to save each month
        amount: Option<String>,
    },
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> BudgetlineResult<()> {
    let service = AccountService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Add {
            name,
            account_type,
            balance,
        } => {
            let account_type = AccountType::parse(&account_type).ok_or_else(|| {
                BudgetlineError::Validation(format!(
                    "Invalid account type: '{}'. Valid types: checking, savings, credit, investment, other",
                    account_type
                ))
            })?;
            let balance = parse_money(&balance, "balance")?;

            let account = service.create(&name, account_type, balance)?;
            println!("Created account: {}", account.name);
            println!("  Type: {}", account.account_type);
            println!("  Balance: {}", account.balance.format_with_symbol(symbol));
            println!("  ID: {}", account.id);
        }

        AccountCommands::List => {
            println!("{}", format_account_list(&service.list()?, symbol));
        }

        AccountCommands::Balance {
            account,
            amount,
            date,
        } => {
            let found = service.require(&account)?;
            let balance = parse_money(&amount, "balance")?;
            let date = date_or_today(date.as_deref())?;
            let updated = service.set_balance(found.id, balance, date)?;
            println!(
                "Balance of '{}' is now {}",
                updated.name,
                updated.balance.format_with_symbol(symbol)
            );
        }

        AccountCommands::Goal { account, amount } => {
            let found = service.require(&account)?;
            let goal = amount
                .as_deref()
                .map(|a| parse_money(a, "goal"))
                .transpose()?;
            let updated = service.set_goal(found.id, goal)?;
            match updated.monthly_savings_goal {
                Some(goal) => println!(
                    "'{}' now aims to save {} a month",
                    updated.name,
                    goal.format_with_symbol(symbol)
                ),
                None => println!("Cleared the savings goal of '{}'", updated.name),
            }
        }
    }

    Ok(())
}
