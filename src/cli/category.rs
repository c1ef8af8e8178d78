//! Category CLI commands

use clap::Subcommand;

use crate::display::category::format_category_list;
use crate::error::BudgetlineResult;
use crate::services::{BudgetService, CategoryService};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a category
    Add {
        /// Category name
        name: String,
    },
    /// List categories and the budgets that own them
    List,
    /// Delete a category
    Remove {
        /// Category name or ID
        category: String,
    },
    /// Assign a category to a budget, moving it if it belongs to another
    Assign {
        /// Category name or ID
        category: String,
        /// Budget name or ID
        budget: String,
    },
    /// Detach a category from its budget
    Unassign {
        /// Category name or ID
        category: String,
    },
    /// Budget a category directly as a share of income; omit to clear
    Percent {
        /// Category name or ID
        category: String,
        /// Percentage of income (0-100)
        percentage: Option<f64>,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> BudgetlineResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add { name } => {
            let category = service.create(&name)?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List => {
            let budgets = BudgetService::new(storage).list()?;
            println!("{}", format_category_list(&service.list()?, &budgets));
        }

        CategoryCommands::Remove { category } => {
            let found = service.require(&category)?;
            service.remove(found.id)?;
            println!("Removed category: {}", found.name);
        }

        CategoryCommands::Assign { category, budget } => {
            let found = service.require(&category)?;
            let budget = BudgetService::new(storage).require(&budget)?;
            service.assign(found.id, budget.id)?;
            println!("Assigned '{}' to budget '{}'", found.name, budget.name);
        }

        CategoryCommands::Unassign { category } => {
            let found = service.require(&category)?;
            service.unassign(found.id)?;
            println!("'{}' is no longer assigned to a budget", found.name);
        }

        CategoryCommands::Percent {
            category,
            percentage,
        } => {
            let found = service.require(&category)?;
            let updated = service.set_percentage(found.id, percentage)?;
            match updated.budget_percentage {
                Some(pct) => println!("'{}' is budgeted at {}% of income", updated.name, pct),
                None => println!("Cleared the income share of '{}'", updated.name),
            }
        }
    }

    Ok(())
}
