//! Bellam Finance - family income, EMI and expense tracker
//!
//! This library provides the core of Bellam Finance: a small household
//! finance manager that records the salaries of family members, monthly
//! EMIs and daily expenses, and grades each month by how much of the
//! household income was left over.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (members, EMIs, expenses, users, money)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: The monthly summary and grading engine
//! - `server`: HTTP API with session login
//! - `cli`: Command handlers for the `bellam` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use bellam::models::{Month, Period};
//! use bellam::reports::FinancialSummary;
//!
//! let summary = FinancialSummary::compute(&members, &emis, &expenses, Period::new(Month::March, 2026));
//! println!("{:?}", summary.grade);
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod server;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
