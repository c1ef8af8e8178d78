//! Transaction CLI commands

use clap::Subcommand;

use super::{date_or_today, parse_date, parse_money};
use crate::config::settings::Settings;
use crate::display::account::format_transaction_list;
use crate::error::BudgetlineResult;
use crate::models::Transaction;
use crate::services::AccountService;
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction (negative amounts are outflows)
    Add {
        /// Amount, e.g. "-42.50" for spending or "3000" for income
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Account name or ID; its balance moves by the amount
        #[arg(short, long)]
        account: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Memo
        #[arg(short, long)]
        memo: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Only transactions on or after this date (YYYY-MM-DD)
        #[arg(short, long)]
        since: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BudgetlineResult<()> {
    let service = AccountService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            account,
            date,
            memo,
        } => {
            let amount = parse_money(&amount, "amount")?;
            let date = date_or_today(date.as_deref())?;

            let mut transaction = Transaction::new(date, amount);
            if let Some(category) = category {
                transaction = transaction.in_category(category);
            }
            if let Some(account) = account {
                transaction = transaction.on_account(service.require(&account)?.id);
            }
            if let Some(memo) = memo {
                transaction = transaction.with_memo(memo);
            }

            let transaction = service.add_transaction(transaction)?;
            println!(
                "Recorded {} on {}",
                transaction.amount.format_with_symbol(symbol),
                transaction.date.format(&settings.date_format)
            );
        }

        TransactionCommands::List { since, limit } => {
            let since = since.as_deref().map(parse_date).transpose()?;
            let transactions = service.list_transactions(since, Some(limit))?;
            println!(
                "{}",
                format_transaction_list(&transactions, &service.list()?, symbol, &settings.date_format)
            );
        }
    }

    Ok(())
}
