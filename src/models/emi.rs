//! EMI (equated monthly installment) model
//!
//! An EMI is a fixed payment obligation recorded against one (month, year).
//! It may also carry the loan's tenure (start and end months); the tenure is
//! informational and never changes which period the installment counts in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{EmiId, UserId};
use super::money::Money;
use super::period::{Month, Period};

/// Validation errors for EMIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmiValidationError {
    EmptyItemName,
    NegativeAmount,
    AmountTooLarge,
    IncompleteTenure,
    TenureEndsBeforeStart { start: Period, end: Period },
}

impl std::fmt::Display for EmiValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyItemName => write!(f, "EMI item name cannot be empty"),
            Self::NegativeAmount => write!(f, "EMI amount cannot be negative"),
            Self::AmountTooLarge => {
                write!(f, "EMI amount cannot exceed {}", Money::MAX_AMOUNT)
            }
            Self::IncompleteTenure => {
                write!(f, "Tenure month and year must be given together")
            }
            Self::TenureEndsBeforeStart { start, end } => {
                write!(f, "EMI tenure ends ({}) before it starts ({})", end, start)
            }
        }
    }
}

impl std::error::Error for EmiValidationError {}

/// An installment payment for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emi {
    pub id: EmiId,
    pub user_id: UserId,
    pub item_name: String,
    pub amount: Money,
    pub month: Month,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_month: Option<Month>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_month: Option<Month>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Editable fields of an EMI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiInput {
    pub item_name: String,
    pub amount: Money,
    pub month: Month,
    pub year: i32,
    #[serde(default)]
    pub start_month: Option<Month>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_month: Option<Month>,
    #[serde(default)]
    pub end_year: Option<i32>,
}

fn tenure_bound(
    month: Option<Month>,
    year: Option<i32>,
) -> Result<Option<Period>, EmiValidationError> {
    match (month, year) {
        (Some(month), Some(year)) => Ok(Some(Period::new(month, year))),
        (None, None) => Ok(None),
        _ => Err(EmiValidationError::IncompleteTenure),
    }
}

impl EmiInput {
    /// Create an input without tenure
    pub fn new(item_name: impl Into<String>, amount: Money, period: Period) -> Self {
        Self {
            item_name: item_name.into(),
            amount,
            month: period.month,
            year: period.year,
            start_month: None,
            start_year: None,
            end_month: None,
            end_year: None,
        }
    }

    /// Attach a tenure
    pub fn with_tenure(mut self, start: Period, end: Period) -> Self {
        self.start_month = Some(start.month);
        self.start_year = Some(start.year);
        self.end_month = Some(end.month);
        self.end_year = Some(end.year);
        self
    }

    /// The period this installment counts in
    pub fn period(&self) -> Period {
        Period::new(self.month, self.year)
    }

    /// Validate and normalize (trims the item name)
    pub fn validated(self) -> Result<Self, EmiValidationError> {
        let item_name = self.item_name.trim().to_string();
        if item_name.is_empty() {
            return Err(EmiValidationError::EmptyItemName);
        }
        if self.amount.is_negative() {
            return Err(EmiValidationError::NegativeAmount);
        }
        if self.amount.exceeds_limit() {
            return Err(EmiValidationError::AmountTooLarge);
        }

        let start = tenure_bound(self.start_month, self.start_year)?;
        let end = tenure_bound(self.end_month, self.end_year)?;
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(EmiValidationError::TenureEndsBeforeStart { start, end });
            }
        }

        Ok(Self { item_name, ..self })
    }
}

impl Emi {
    /// Create a new EMI owned by `user_id`
    pub fn new(id: EmiId, user_id: UserId, input: EmiInput) -> Self {
        Self {
            id,
            user_id,
            item_name: input.item_name,
            amount: input.amount,
            month: input.month,
            year: input.year,
            start_month: input.start_month,
            start_year: input.start_year,
            end_month: input.end_month,
            end_year: input.end_year,
            created_at: Utc::now(),
        }
    }

    /// Replace the editable fields wholesale
    pub fn apply(&mut self, input: EmiInput) {
        self.item_name = input.item_name;
        self.amount = input.amount;
        self.month = input.month;
        self.year = input.year;
        self.start_month = input.start_month;
        self.start_year = input.start_year;
        self.end_month = input.end_month;
        self.end_year = input.end_year;
    }

    /// The period this installment counts in
    pub fn period(&self) -> Period {
        Period::new(self.month, self.year)
    }

    /// The loan tenure, when both ends are recorded
    pub fn tenure(&self) -> Option<(Period, Period)> {
        let start = tenure_bound(self.start_month, self.start_year).ok()??;
        let end = tenure_bound(self.end_month, self.end_year).ok()??;
        Some((start, end))
    }
}
