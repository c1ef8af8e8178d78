//! Budget model
//!
//! A budget caps spending across the categories assigned to it, either as a
//! fixed amount or as a percentage of monthly income, over a weekly, monthly
//! or recurring custom period.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;
use super::period::PeriodType;

/// Default display color for new budgets
pub const DEFAULT_COLOR: &str = "#4f86f7";

/// Whether a budget amount is currency or percentage points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountType {
    Fixed,
    Percentage,
}

impl fmt::Display for AmountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Percentage => write!(f, "percentage"),
        }
    }
}

/// The configured size of a budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum BudgetAmount {
    /// A currency amount per period
    Fixed(Money),
    /// Percentage points (0-100) of effective monthly income
    Percentage(f64),
}

impl BudgetAmount {
    pub fn amount_type(&self) -> AmountType {
        match self {
            Self::Fixed(_) => AmountType::Fixed,
            Self::Percentage(_) => AmountType::Percentage,
        }
    }

    /// Percentage points, if this is a percentage amount
    pub fn percentage_points(&self) -> Option<f64> {
        match self {
            Self::Percentage(pct) => Some(*pct),
            Self::Fixed(_) => None,
        }
    }
}

impl fmt::Display for BudgetAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(amount) => write!(f, "{}", amount),
            Self::Percentage(pct) => write!(f, "{}% of income", pct),
        }
    }
}

/// A spending budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub name: String,

    /// Display color (`#rrggbb`)
    #[serde(default = "default_color")]
    pub color: String,

    pub amount: BudgetAmount,

    #[serde(default)]
    pub period_type: PeriodType,

    /// First day of the original custom cycle (custom periods only)
    #[serde(default)]
    pub custom_start_date: Option<NaiveDate>,

    /// End (exclusive) of the original custom cycle (custom periods only)
    #[serde(default)]
    pub custom_end_date: Option<NaiveDate>,

    /// Position in the budget list; dense, starting at 0
    #[serde(default)]
    pub sort_order: i32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Budget {
    /// Create a new monthly budget
    pub fn new(name: impl Into<String>, amount: BudgetAmount) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            name: name.into(),
            color: default_color(),
            amount,
            period_type: PeriodType::Monthly,
            custom_start_date: None,
            custom_end_date: None,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder: weekly period
    pub fn weekly(mut self) -> Self {
        self.period_type = PeriodType::Weekly;
        self
    }

    /// Builder: custom recurring period anchored at `start`
    pub fn custom(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.period_type = PeriodType::Custom;
        self.custom_start_date = Some(start);
        self.custom_end_date = Some(end);
        self
    }

    /// Builder: display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn amount_type(&self) -> AmountType {
        self.amount.amount_type()
    }

    pub fn set_amount(&mut self, amount: BudgetAmount) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    /// Change the period; custom dates are cleared unless the new period is custom
    pub fn set_period(
        &mut self,
        period_type: PeriodType,
        custom_start_date: Option<NaiveDate>,
        custom_end_date: Option<NaiveDate>,
    ) {
        self.period_type = period_type;
        if period_type == PeriodType::Custom {
            self.custom_start_date = custom_start_date;
            self.custom_end_date = custom_end_date;
        } else {
            self.custom_start_date = None;
            self.custom_end_date = None;
        }
        self.updated_at = Utc::now();
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(BudgetValidationError::NameTooLong(self.name.len()));
        }

        if !is_hex_color(&self.color) {
            return Err(BudgetValidationError::InvalidColor(self.color.clone()));
        }

        match self.amount {
            BudgetAmount::Fixed(amount) if amount.is_negative() => {
                return Err(BudgetValidationError::NegativeAmount);
            }
            BudgetAmount::Percentage(pct) if !(0.0..=100.0).contains(&pct) => {
                return Err(BudgetValidationError::PercentageOutOfRange(pct));
            }
            _ => {}
        }

        if self.period_type == PeriodType::Custom {
            match (self.custom_start_date, self.custom_end_date) {
                (Some(start), Some(end)) if end > start => {}
                (Some(_), Some(_)) => return Err(BudgetValidationError::CustomRangeInverted),
                _ => return Err(BudgetValidationError::CustomDatesMissing),
            }
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.amount, self.period_type)
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
    NegativeAmount,
    PercentageOutOfRange(f64),
    CustomDatesMissing,
    CustomRangeInverted,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Budget name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => write!(f, "Invalid color '{}', expected #rrggbb", color),
            Self::NegativeAmount => write!(f, "Budget amount cannot be negative"),
            Self::PercentageOutOfRange(pct) => {
                write!(f, "Budget percentage must be between 0 and 100, got {}", pct)
            }
            Self::CustomDatesMissing => {
                write!(f, "Custom periods need both a start and an end date")
            }
            Self::CustomRangeInverted => {
                write!(f, "Custom period end date must be after its start date")
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
