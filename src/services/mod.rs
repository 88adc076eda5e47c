//! Service layer for Bellam Finance
//!
//! Services sit on top of the storage layer and handle validation, id
//! assignment and per-user scoping of every record.

pub mod emi;
pub mod expense;
pub mod member;
pub mod period;
pub mod user;

pub use emi::EmiService;
pub use expense::ExpenseService;
pub use member::MemberService;
pub use period::PeriodService;
pub use user::UserService;
