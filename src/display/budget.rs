//! Budget display formatting
//!
//! Budget lists, and the status view produced by a refresh.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Budget, BudgetAmount, PeriodType};
use crate::services::{AllocationSummary, CategoryAllocation};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "#")]
    order: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Color")]
    color: String,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Budget")]
    name: String,
    #[tabled(rename = "Window")]
    window: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Left")]
    left: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Categories")]
    categories: String,
}

#[derive(Tabled)]
struct CategoryAllocationRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn format_amount(amount: BudgetAmount, symbol: &str) -> String {
    match amount {
        BudgetAmount::Fixed(money) => money.format_with_symbol(symbol),
        BudgetAmount::Percentage(pct) => format!("{}% of income", pct),
    }
}

fn format_period(budget: &Budget) -> String {
    match (budget.period_type, budget.custom_start_date, budget.custom_end_date) {
        (PeriodType::Custom, Some(start), Some(end)) => {
            format!("Custom ({} days from {})", (end - start).num_days(), start)
        }
        (period_type, _, _) => period_type.to_string(),
    }
}

/// Format budgets in display order
pub fn format_budget_list(budgets: &[Budget], symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        order: b.sort_order,
        name: b.name.clone(),
        amount: format_amount(b.amount, symbol),
        period: format_period(b),
        color: b.color.clone(),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

fn format_category_allocations(allocations: &[CategoryAllocation], symbol: &str) -> String {
    let rows = allocations.iter().map(|a| CategoryAllocationRow {
        name: a.category.name.clone(),
        share: format!("{}%", a.percentage),
        spent: a.spent.format_with_symbol(symbol),
        limit: a.limit.format_with_symbol(symbol),
        used: format!("{:.1}%", a.percentage_used),
        status: a.status.to_string(),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

/// Format the annotated budgets and portfolio totals of a refresh
pub fn format_budget_status(summary: &AllocationSummary, symbol: &str) -> String {
    let mut output = String::new();

    if summary.budgets.is_empty() {
        output.push_str("No budgets found.\n");
    } else {
        let rows = summary.budgets.iter().map(|b| StatusRow {
            name: b.budget.name.clone(),
            window: b.window.to_string(),
            spent: b.spent.format_with_symbol(symbol),
            limit: b.limit.format_with_symbol(symbol),
            left: b.remaining().format_with_symbol(symbol),
            used: format!("{:.1}%", b.percentage_used),
            status: b.status.to_string(),
            categories: b
                .categories
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        });
        output.push_str(&Table::new(rows).with(Style::psql()).to_string());
        output.push('\n');
    }

    let income_source = if summary.income.use_dynamic_income {
        "dynamic"
    } else {
        "manual"
    };
    output.push('\n');
    output.push_str(&format!(
        "Income:       {} ({}; dynamic {}, manual {})\n",
        summary.effective_income.format_with_symbol(symbol),
        income_source,
        summary.income.dynamic_income.format_with_symbol(symbol),
        summary.income.manual_income.format_with_symbol(symbol),
    ));
    output.push_str(&format!(
        "Allocated:    {} ({}% of income in percentage budgets)\n",
        summary.total_allocated_currency.format_with_symbol(symbol),
        summary.total_allocated_percentage,
    ));
    output.push_str(&format!(
        "Unallocated:  {:.1}%\n",
        summary.unallocated_percentage
    ));
    output.push_str(&format!(
        "Spent:        {}\n",
        summary.total_spent.format_with_symbol(symbol)
    ));

    let attention: Vec<String> = summary
        .needing_attention()
        .map(|b| format!("{} ({})", b.budget.name, b.status))
        .collect();
    if !attention.is_empty() {
        output.push_str(&format!("Attention:    {}\n", attention.join(", ")));
    }

    if !summary.category_allocations.is_empty() {
        output.push_str("\nCategory allocations (this month):\n");
        output.push_str(&format_category_allocations(&summary.category_allocations, symbol));
        output.push('\n');
    }

    output
}
