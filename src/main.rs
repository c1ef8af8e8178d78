use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use budgetline::cli::{
    handle_account_command, handle_budget_command, handle_category_command, handle_income_command,
    handle_savings_command, handle_transaction_command,
};
use budgetline::config::{paths::BudgetlinePaths, settings::Settings};
use budgetline::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budgetline",
    author = "Kaylee Beyene",
    version,
    about = "Budget periods, percentage-of-income limits and savings goals",
    long_about = "budgetline tracks spending budgets over weekly, monthly or custom \
                  recurring periods, resolves percentage budgets against your income \
                  and follows savings accounts against monthly goals."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Budget management and status
    #[command(subcommand)]
    Budget(budgetline::cli::BudgetCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(budgetline::cli::CategoryCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(budgetline::cli::AccountCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(budgetline::cli::TransactionCommands),

    /// Income settings
    #[command(subcommand)]
    Income(budgetline::cli::IncomeCommands),

    /// Savings progress this month
    Savings,

    /// Show current configuration and paths
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = BudgetlinePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths)?.with_income_category(settings.income_category.clone());
    storage.load_all()?;
    let storage = Arc::new(storage);

    match cli.command {
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd).await?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Account(cmd)) => {
            handle_account_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(&storage, &settings, cmd).await?;
        }
        Some(Commands::Savings) => {
            handle_savings_command(&storage, &settings).await?;
        }
        Some(Commands::Config) => {
            println!("budgetline configuration");
            println!("========================");
            let paths = storage.paths();
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Income category: {}", settings.income_category);
        }
        None => {
            println!("budgetline - budget periods, allocations and savings goals");
            println!();
            println!("Run 'budgetline --help' for usage information.");
            println!("Run 'budgetline budget status' to see where your budgets stand.");
        }
    }

    Ok(())
}
