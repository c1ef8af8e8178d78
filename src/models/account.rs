//! Account model
//!
//! Accounts carry a current balance. Savings and investment accounts may also
//! carry a monthly savings goal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    Credit,
    Investment,
    Other,
}

impl AccountType {
    /// Accounts whose balance growth counts as saving
    pub fn is_savings_like(&self) -> bool {
        matches!(self, Self::Savings | Self::Investment)
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit" | "credit_card" | "creditcard" => Some(Self::Credit),
            "investment" | "brokerage" => Some(Self::Investment),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::Credit => write!(f, "Credit Card"),
            Self::Investment => write!(f, "Investment"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,

    /// Account name (e.g., "High-Yield Savings")
    pub name: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Current balance
    pub balance: Money,

    /// Target amount to save each month (savings/investment accounts only)
    #[serde(default)]
    pub monthly_savings_goal: Option<Money>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            balance: Money::zero(),
            monthly_savings_goal: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new account with an opening balance
    pub fn with_balance(
        name: impl Into<String>,
        account_type: AccountType,
        balance: Money,
    ) -> Self {
        let mut account = Self::new(name, account_type);
        account.balance = balance;
        account
    }

    /// Apply a signed transaction amount to the balance
    pub fn apply(&mut self, amount: Money) {
        self.balance += amount;
        self.updated_at = Utc::now();
    }

    pub fn set_monthly_savings_goal(&mut self, goal: Option<Money>) {
        self.monthly_savings_goal = goal;
        self.updated_at = Utc::now();
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        if let Some(goal) = self.monthly_savings_goal {
            if !self.account_type.is_savings_like() {
                return Err(AccountValidationError::GoalOnNonSavingsAccount(
                    self.account_type,
                ));
            }
            if goal.is_negative() {
                return Err(AccountValidationError::NegativeGoal);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    GoalOnNonSavingsAccount(AccountType),
    NegativeGoal,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::GoalOnNonSavingsAccount(t) => {
                write!(f, "Savings goals only apply to savings or investment accounts, not {}", t)
            }
            Self::NegativeGoal => write!(f, "Monthly savings goal cannot be negative"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_savings_like() {
        assert!(AccountType::Savings.is_savings_like());
        assert!(AccountType::Investment.is_savings_like());
        assert!(!AccountType::Checking.is_savings_like());
        assert!(!AccountType::Credit.is_savings_like());
        assert!(!AccountType::Other.is_savings_like());
    }

    #[test]
    fn test_goal_only_on_savings_accounts() {
        let mut checking = Account::new("Checking", AccountType::Checking);
        checking.set_monthly_savings_goal(Some(Money::from_units(100)));
        assert!(matches!(
            checking.validate(),
            Err(AccountValidationError::GoalOnNonSavingsAccount(_))
        ));

        let mut savings = Account::new("Savings", AccountType::Savings);
        savings.set_monthly_savings_goal(Some(Money::from_units(100)));
        assert!(savings.validate().is_ok());
    }

    #[test]
    fn test_apply_amount() {
        let mut account =
            Account::with_balance("Savings", AccountType::Savings, Money::from_units(1500));
        account.apply(Money::from_units(300));
        account.apply(Money::from_units(-50));
        assert_eq!(account.balance, Money::from_units(1750));
    }

    #[test]
    fn test_parse_account_type() {
        assert_eq!(AccountType::parse("Savings"), Some(AccountType::Savings));
        assert_eq!(AccountType::parse("credit_card"), Some(AccountType::Credit));
        assert_eq!(AccountType::parse("piggy"), None);
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let account = Account::new("Brokerage", AccountType::Investment);
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["type"], "investment");
    }
}
