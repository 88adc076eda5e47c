//! Family member service
//!
//! Provides business logic for managing a user's salaried family members.

use crate::error::{FinanceError, FinanceResult};
use crate::models::{FamilyMember, MemberId, MemberInput, UserId};
use crate::storage::Storage;

/// Service for family member management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    /// Create a new member service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All members owned by `owner`, in insertion order
    pub fn list(&self, owner: UserId) -> FinanceResult<Vec<FamilyMember>> {
        self.storage.read(|db| {
            db.family_members
                .iter()
                .filter(|m| m.user_id == owner)
                .cloned()
                .collect()
        })
    }

    /// Get a member by ID
    pub fn get(&self, owner: UserId, id: MemberId) -> FinanceResult<Option<FamilyMember>> {
        self.storage.read(|db| {
            db.family_members
                .iter()
                .find(|m| m.id == id && m.user_id == owner)
                .cloned()
        })
    }

    /// Add a member
    pub fn create(&self, owner: UserId, input: MemberInput) -> FinanceResult<FamilyMember> {
        let input = input
            .validated()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let member = self.storage.write(|db| {
            let member = FamilyMember::new(db.next_member_id()?, owner, input);
            db.family_members.push(member.clone());
            Ok(member)
        })?;

        tracing::info!(user = %owner, member = %member.id, "family member added");
        Ok(member)
    }

    /// Replace a member's name and salary
    pub fn update(
        &self,
        owner: UserId,
        id: MemberId,
        input: MemberInput,
    ) -> FinanceResult<FamilyMember> {
        let input = input
            .validated()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let member = self.storage.write(|db| {
            let member = db
                .family_members
                .iter_mut()
                .find(|m| m.id == id && m.user_id == owner)
                .ok_or_else(|| FinanceError::member_not_found(id.to_string()))?;
            member.apply(input);
            Ok(member.clone())
        })?;

        tracing::info!(user = %owner, member = %id, "family member updated");
        Ok(member)
    }

    /// Remove a member. Returns whether anything was removed; removing an
    /// unknown ID is not an error.
    pub fn delete(&self, owner: UserId, id: MemberId) -> FinanceResult<bool> {
        let exists = self.get(owner, id)?.is_some();
        if !exists {
            tracing::debug!(user = %owner, member = %id, "delete of unknown member ignored");
            return Ok(false);
        }

        self.storage.write(|db| {
            db.family_members
                .retain(|m| !(m.id == id && m.user_id == owner));
            Ok(())
        })?;

        tracing::info!(user = %owner, member = %id, "family member removed");
        Ok(true)
    }
}
