//! The on-disk database document
//!
//! One JSON object holding every collection. Field names match the layout
//! the browser frontend and older database files use.

use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::models::ids::next_raw_id;
use crate::models::{
    DailyExpense, Emi, EmiId, ExpenseId, FamilyMember, MemberId, User, UserId,
};

/// Every collection, as stored in `database.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub family_members: Vec<FamilyMember>,
    #[serde(default)]
    pub emis: Vec<Emi>,
    #[serde(default)]
    pub daily_expenses: Vec<DailyExpense>,
}

/// A user's slice of the database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub family_members: Vec<FamilyMember>,
    pub emis: Vec<Emi>,
    pub daily_expenses: Vec<DailyExpense>,
}

/// Allocate past the largest id in a collection
fn allocate(collection: &str, max_existing: Option<i64>) -> Result<i64, FinanceError> {
    next_raw_id(max_existing).ok_or_else(|| {
        FinanceError::Storage(format!("No {} identifiers left after {}", collection, i64::MAX))
    })
}

impl Database {
    pub fn next_user_id(&self) -> Result<UserId, FinanceError> {
        allocate("user", self.users.iter().map(|u| u.id.as_i64()).max()).map(UserId::from_raw)
    }

    pub fn next_member_id(&self) -> Result<MemberId, FinanceError> {
        allocate(
            "member",
            self.family_members.iter().map(|m| m.id.as_i64()).max(),
        )
        .map(MemberId::from_raw)
    }

    pub fn next_emi_id(&self) -> Result<EmiId, FinanceError> {
        allocate("EMI", self.emis.iter().map(|e| e.id.as_i64()).max()).map(EmiId::from_raw)
    }

    pub fn next_expense_id(&self) -> Result<ExpenseId, FinanceError> {
        allocate(
            "expense",
            self.daily_expenses.iter().map(|e| e.id.as_i64()).max(),
        )
        .map(ExpenseId::from_raw)
    }

    /// Copy out everything `owner` can see
    pub fn snapshot_for(&self, owner: UserId) -> Snapshot {
        Snapshot {
            family_members: self
                .family_members
                .iter()
                .filter(|m| m.user_id == owner)
                .cloned()
                .collect(),
            emis: self
                .emis
                .iter()
                .filter(|e| e.user_id == owner)
                .cloned()
                .collect(),
            daily_expenses: self
                .daily_expenses
                .iter()
                .filter(|e| e.user_id == owner)
                .cloned()
                .collect(),
        }
    }
}
