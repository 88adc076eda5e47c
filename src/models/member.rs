//! Family member model
//!
//! A family member contributes a monthly salary to household income. Salary
//! is not period-scoped: every member counts toward every month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{MemberId, UserId};
use super::money::Money;

/// Validation errors for family members
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeSalary,
    SalaryTooLarge,
}

impl std::fmt::Display for MemberValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Member name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Member name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::NegativeSalary => write!(f, "Salary cannot be negative"),
            Self::SalaryTooLarge => {
                write!(f, "Salary cannot exceed {}", Money::MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for MemberValidationError {}

/// Longest accepted member name
pub const MAX_NAME_LEN: usize = 100;

/// A salaried member of the household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: MemberId,
    pub user_id: UserId,
    pub name: String,
    pub salary: Money,
    pub created_at: DateTime<Utc>,
}

/// Editable fields of a family member, as submitted on create and edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub name: String,
    pub salary: Money,
}

impl MemberInput {
    /// Create an input
    pub fn new(name: impl Into<String>, salary: Money) -> Self {
        Self {
            name: name.into(),
            salary,
        }
    }

    /// Validate and normalize (trims the name)
    pub fn validated(self) -> Result<Self, MemberValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(MemberValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(MemberValidationError::NameTooLong(name.chars().count()));
        }
        if self.salary.is_negative() {
            return Err(MemberValidationError::NegativeSalary);
        }
        if self.salary.exceeds_limit() {
            return Err(MemberValidationError::SalaryTooLarge);
        }
        Ok(Self {
            name,
            salary: self.salary,
        })
    }
}

impl FamilyMember {
    /// Create a new member owned by `user_id`
    pub fn new(id: MemberId, user_id: UserId, input: MemberInput) -> Self {
        Self {
            id,
            user_id,
            name: input.name,
            salary: input.salary,
            created_at: Utc::now(),
        }
    }

    /// Replace the editable fields wholesale
    pub fn apply(&mut self, input: MemberInput) {
        self.name = input.name;
        self.salary = input.salary;
    }
}
