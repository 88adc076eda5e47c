//! Daily expense model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ExpenseId, UserId};
use super::money::Money;
use super::period::{Month, Period};

/// Validation errors for daily expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyProductName,
    NegativePrice,
    PriceTooLarge,
}

impl std::fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyProductName => write!(f, "Product name cannot be empty"),
            Self::NegativePrice => write!(f, "Price cannot be negative"),
            Self::PriceTooLarge => write!(f, "Price cannot exceed {}", Money::MAX_AMOUNT),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// A single purchase recorded against one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyExpense {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub product_name: String,
    pub price: Money,
    pub month: Month,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

/// Editable fields of a daily expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    pub product_name: String,
    pub price: Money,
    pub month: Month,
    pub year: i32,
}

impl ExpenseInput {
    pub fn new(product_name: impl Into<String>, price: Money, period: Period) -> Self {
        Self {
            product_name: product_name.into(),
            price,
            month: period.month,
            year: period.year,
        }
    }

    /// Validate and normalize (trims the product name)
    pub fn validated(self) -> Result<Self, ExpenseValidationError> {
        let product_name = self.product_name.trim().to_string();
        if product_name.is_empty() {
            return Err(ExpenseValidationError::EmptyProductName);
        }
        if self.price.is_negative() {
            return Err(ExpenseValidationError::NegativePrice);
        }
        if self.price.exceeds_limit() {
            return Err(ExpenseValidationError::PriceTooLarge);
        }
        Ok(Self {
            product_name,
            ..self
        })
    }
}

impl DailyExpense {
    pub fn new(id: ExpenseId, user_id: UserId, input: ExpenseInput) -> Self {
        Self {
            id,
            user_id,
            product_name: input.product_name,
            price: input.price,
            month: input.month,
            year: input.year,
            created_at: Utc::now(),
        }
    }

    /// Replace the editable fields wholesale
    pub fn apply(&mut self, input: ExpenseInput) {
        self.product_name = input.product_name;
        self.price = input.price;
        self.month = input.month;
        self.year = input.year;
    }

    pub fn period(&self) -> Period {
        Period::new(self.month, self.year)
    }
}
