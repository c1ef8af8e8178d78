//! Income settings
//!
//! One record per data directory: whether percentage budgets follow income
//! observed in the ledger or a manually entered figure, and the overall
//! monthly savings target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Validation errors for income settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    NegativeManualIncome,
    NegativeSavingsTarget,
}

impl std::fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeManualIncome => write!(f, "Manual income cannot be negative"),
            Self::NegativeSavingsTarget => write!(f, "Monthly savings target cannot be negative"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// Income preferences shared by every budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSettings {
    /// Use income computed from this month's transactions instead of `manual_income`
    #[serde(default = "default_use_dynamic")]
    pub use_dynamic_income: bool,

    #[serde(default)]
    pub manual_income: Money,

    #[serde(default)]
    pub monthly_savings_target: Money,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_use_dynamic() -> bool {
    true
}

impl Default for IncomeSettings {
    fn default() -> Self {
        Self {
            use_dynamic_income: default_use_dynamic(),
            manual_income: Money::zero(),
            monthly_savings_target: Money::zero(),
            updated_at: Utc::now(),
        }
    }
}

impl IncomeSettings {
    /// Settings that always use a manually entered income
    pub fn manual(income: Money) -> Self {
        Self {
            use_dynamic_income: false,
            manual_income: income,
            ..Self::default()
        }
    }

    pub fn set_use_dynamic_income(&mut self, dynamic: bool) {
        self.use_dynamic_income = dynamic;
        self.updated_at = Utc::now();
    }

    pub fn set_manual_income(&mut self, amount: Money) {
        self.manual_income = amount;
        self.updated_at = Utc::now();
    }

    pub fn set_monthly_savings_target(&mut self, amount: Money) {
        self.monthly_savings_target = amount;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.manual_income.is_negative() {
            return Err(IncomeValidationError::NegativeManualIncome);
        }
        if self.monthly_savings_target.is_negative() {
            return Err(IncomeValidationError::NegativeSavingsTarget);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_dynamic() {
        let settings = IncomeSettings::default();
        assert!(settings.use_dynamic_income);
        assert!(settings.manual_income.is_zero());
    }

    #[test]
    fn test_manual_constructor() {
        let settings = IncomeSettings::manual(Money::from_units(4000));
        assert!(!settings.use_dynamic_income);
        assert_eq!(settings.manual_income, Money::from_units(4000));
    }

    #[test]
    fn test_validation() {
        let mut settings = IncomeSettings::default();
        settings.set_manual_income(Money::from_cents(-1));
        assert_eq!(
            settings.validate(),
            Err(IncomeValidationError::NegativeManualIncome)
        );

        settings.set_manual_income(Money::zero());
        settings.set_monthly_savings_target(Money::from_cents(-1));
        assert_eq!(
            settings.validate(),
            Err(IncomeValidationError::NegativeSavingsTarget)
        );
    }

    #[test]
    fn test_empty_record_deserializes() {
        let settings: IncomeSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.use_dynamic_income);
        assert!(settings.monthly_savings_target.is_zero());
    }
}
