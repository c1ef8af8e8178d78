//! Budget CLI commands

use std::sync::Arc;

use clap::Subcommand;

use super::{parse_date, parse_money, refresh_snapshot};
use crate::config::settings::Settings;
use crate::display::budget::{format_amount, format_budget_list, format_budget_status};
use crate::error::{BudgetlineError, BudgetlineResult};
use crate::models::{Budget, BudgetAmount, PeriodType};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget
    Add {
        /// Budget name
        name: String,
        /// Fixed amount ("400", "400.00") or share of income ("20%")
        amount: String,
        /// Period: weekly, monthly or custom
        #[arg(short, long, default_value = "monthly")]
        period: String,
        /// First day of the first custom cycle (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End of the first custom cycle, exclusive (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Display color (#rrggbb)
        #[arg(short, long)]
        color: Option<String>,
        /// Insert at this position instead of appending
        #[arg(long)]
        position: Option<usize>,
    },
    /// List budgets in display order
    List,
    /// Change a budget's amount or period
    Edit {
        /// Budget name or ID
        budget: String,
        /// New fixed amount or share of income ("20%")
        #[arg(short, long)]
        amount: Option<String>,
        /// New period: weekly, monthly or custom
        #[arg(short, long)]
        period: Option<String>,
        /// First day of the first custom cycle (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End of the first custom cycle, exclusive (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },
    /// Delete a budget; its categories become unassigned
    Remove {
        /// Budget name or ID
        budget: String,
    },
    /// Move a budget to a new position
    Move {
        /// Budget name or ID
        budget: String,
        /// Zero-based position
        position: usize,
    },
    /// Show spending against every budget for its current period
    Status,
}

/// Parse "20%" as a share of income, anything else as a fixed amount
pub fn parse_amount(input: &str) -> BudgetlineResult<BudgetAmount> {
    let input = input.trim();
    match input.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().map(BudgetAmount::Percentage).map_err(|_| {
            BudgetlineError::Validation(format!("Invalid percentage '{}'", input))
        }),
        None => parse_money(input, "amount").map(BudgetAmount::Fixed),
    }
}

fn parse_period(input: &str) -> BudgetlineResult<PeriodType> {
    PeriodType::parse(input).ok_or_else(|| {
        BudgetlineError::Validation(format!(
            "Invalid period: '{}'. Valid periods: weekly, monthly, custom",
            input
        ))
    })
}

/// Handle a budget command
pub async fn handle_budget_command(
    storage: &Arc<Storage>,
    settings: &Settings,
    cmd: BudgetCommands,
) -> BudgetlineResult<()> {
    let service = BudgetService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Add {
            name,
            amount,
            period,
            start,
            end,
            color,
            position,
        } => {
            let amount = parse_amount(&amount)?;
            let period_type = parse_period(&period)?;
            let start = start.as_deref().map(parse_date).transpose()?;
            let end = end.as_deref().map(parse_date).transpose()?;

            let mut budget = Budget::new(name, amount);
            budget.set_period(period_type, start, end);
            if let Some(color) = color {
                budget = budget.with_color(color);
            }

            let budget = service.create(budget, position)?;
            println!("Created budget: {}", budget.name);
            println!("  Amount: {}", format_amount(budget.amount, symbol));
            println!("  Period: {}", budget.period_type);
            println!("  Position: {}", budget.sort_order);
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::List => {
            println!("{}", format_budget_list(&service.list()?, symbol));
        }

        BudgetCommands::Edit {
            budget,
            amount,
            period,
            start,
            end,
        } => {
            let found = service.require(&budget)?;
            let period_changed = period.is_some() || start.is_some() || end.is_some();
            if amount.is_none() && !period_changed {
                return Err(BudgetlineError::Validation(
                    "Nothing to change. Pass --amount, --period, --start or --end".into(),
                ));
            }

            let mut updated = found.clone();
            if let Some(amount) = amount {
                updated = service.update_amount(found.id, parse_amount(&amount)?)?;
            }
            if period_changed {
                let period_type = match period {
                    Some(p) => parse_period(&p)?,
                    None => found.period_type,
                };
                let start = match start {
                    Some(d) => Some(parse_date(&d)?),
                    None => found.custom_start_date,
                };
                let end = match end {
                    Some(d) => Some(parse_date(&d)?),
                    None => found.custom_end_date,
                };
                updated = service.update_period(found.id, period_type, start, end)?;
            }

            println!("Updated budget: {}", updated.name);
            println!("  Amount: {}", format_amount(updated.amount, symbol));
            println!("  Period: {}", updated.period_type);
        }

        BudgetCommands::Remove { budget } => {
            let found = service.require(&budget)?;
            let released = service.categories(found.id)?.len();
            service.remove(found.id)?;
            println!("Removed budget: {}", found.name);
            if released > 0 {
                println!("  {} categories are now unassigned", released);
            }
        }

        BudgetCommands::Move { budget, position } => {
            let found = service.require(&budget)?;
            let budgets = service.move_to(found.id, position)?;
            println!("{}", format_budget_list(&budgets, symbol));
        }

        BudgetCommands::Status => {
            let snapshot = refresh_snapshot(storage).await?;
            print!("{}", format_budget_status(&snapshot.allocation, symbol));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("20%").unwrap(), BudgetAmount::Percentage(20.0));
        assert_eq!(parse_amount(" 12.5 % ").unwrap(), BudgetAmount::Percentage(12.5));
        assert_eq!(
            parse_amount("400").unwrap(),
            BudgetAmount::Fixed(Money::from_units(400))
        );
        assert!(parse_amount("lots%").unwrap_err().is_validation());
        assert!(parse_amount("lots").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(parse_period("weekly").unwrap(), PeriodType::Weekly);
        assert!(parse_period("fortnightly").unwrap_err().is_validation());
    }
}
