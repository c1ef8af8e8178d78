//! Account and transaction display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Account, Money, Transaction};

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    account_type: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Monthly goal")]
    goal: String,
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Memo")]
    memo: String,
}

/// Format accounts with a total balance line
pub fn format_account_list(accounts: &[Account], symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let rows = accounts.iter().map(|a| AccountRow {
        name: a.name.clone(),
        account_type: a.account_type.to_string(),
        balance: a.balance.format_with_symbol(symbol),
        goal: a
            .monthly_savings_goal
            .map(|g| g.format_with_symbol(symbol))
            .unwrap_or_default(),
    });

    let total: Money = accounts.iter().map(|a| a.balance).sum();
    format!(
        "{}\nTotal: {}",
        Table::new(rows).with(Style::psql()),
        total.format_with_symbol(symbol)
    )
}

/// Format transactions; `accounts` resolves account names
pub fn format_transaction_list(
    transactions: &[Transaction],
    accounts: &[Account],
    symbol: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow {
        date: t.date.format(date_format).to_string(),
        amount: t.amount.format_with_symbol(symbol),
        category: t.category.clone().unwrap_or_default(),
        account: t
            .account_id
            .and_then(|id| accounts.iter().find(|a| a.id == id))
            .map(|a| a.name.clone())
            .unwrap_or_default(),
        memo: t.memo.clone(),
    });

    Table::new(rows).with(Style::psql()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;
    use chrono::NaiveDate;

    #[test]
    fn test_account_list_total() {
        let accounts = vec![
            Account::with_balance("Checking", AccountType::Checking, Money::from_units(250)),
            Account::with_balance("Rainy Day", AccountType::Savings, Money::from_units(1500)),
        ];
        let output = format_account_list(&accounts, "$");
        assert!(output.contains("Rainy Day"));
        assert!(output.contains("Total: $1750.00"));
    }

    #[test]
    fn test_transaction_list_resolves_account_names() {
        let checking = Account::new("Checking", AccountType::Checking);
        let transactions = vec![Transaction::new(
            NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            Money::from_cents(-1250),
        )
        .in_category("Dining")
        .on_account(checking.id)
        .with_memo("tacos")];

        let output = format_transaction_list(&transactions, &[checking], "$", "%d/%m/%Y");
        assert!(output.contains("04/03/2025"));
        assert!(output.contains("-$12.50"));
        assert!(output.contains("Checking"));
        assert!(output.contains("tacos"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_account_list(&[], "$"), "No accounts found.");
        assert_eq!(
            format_transaction_list(&[], &[], "$", "%Y-%m-%d"),
            "No transactions found."
        );
    }
}
