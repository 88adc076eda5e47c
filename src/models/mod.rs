//! Core data models for Bellam Finance
//!
//! This module contains the data structures of the household ledger:
//! users, family members, EMIs, daily expenses, and the money and period
//! types they are built from.

pub mod emi;
pub mod expense;
pub mod ids;
pub mod member;
pub mod money;
pub mod period;
pub mod user;

pub use emi::{Emi, EmiInput, EmiValidationError};
pub use expense::{DailyExpense, ExpenseInput, ExpenseValidationError};
pub use ids::{EmiId, ExpenseId, MemberId, UserId};
pub use member::{FamilyMember, MemberInput, MemberValidationError};
pub use money::{Money, MoneyParseError};
pub use period::{Month, Period, PeriodParseError};
pub use user::{User, UserValidationError};
