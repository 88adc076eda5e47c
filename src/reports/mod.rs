//! Reports module for Bellam Finance
//!
//! The monthly summary: income against a month's EMIs and daily expenses,
//! with a letter grade for the savings rate.

pub mod summary;

pub use summary::{FinancialSummary, Grade};
