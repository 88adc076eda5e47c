//! EMI service
//!
//! Provides business logic for installment obligations. Every EMI belongs
//! to one (month, year); listing by period is what the monthly views use.

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Emi, EmiId, EmiInput, Period, UserId};
use crate::storage::Storage;

/// Service for EMI management
pub struct EmiService<'a> {
    storage: &'a Storage,
}

impl<'a> EmiService<'a> {
    /// Create a new EMI service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All EMIs owned by `owner`, in insertion order
    pub fn list(&self, owner: UserId) -> FinanceResult<Vec<Emi>> {
        self.storage.read(|db| {
            db.emis
                .iter()
                .filter(|e| e.user_id == owner)
                .cloned()
                .collect()
        })
    }

    /// EMIs owned by `owner` that fall in `period`
    pub fn for_period(&self, owner: UserId, period: Period) -> FinanceResult<Vec<Emi>> {
        self.storage.read(|db| {
            db.emis
                .iter()
                .filter(|e| e.user_id == owner && period.matches(e.month, e.year))
                .cloned()
                .collect()
        })
    }

    /// Get an EMI by ID
    pub fn get(&self, owner: UserId, id: EmiId) -> FinanceResult<Option<Emi>> {
        self.storage.read(|db| {
            db.emis
                .iter()
                .find(|e| e.id == id && e.user_id == owner)
                .cloned()
        })
    }

    /// Record an EMI
    pub fn create(&self, owner: UserId, input: EmiInput) -> FinanceResult<Emi> {
        let input = input
            .validated()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let emi = self.storage.write(|db| {
            let emi = Emi::new(db.next_emi_id()?, owner, input);
            db.emis.push(emi.clone());
            Ok(emi)
        })?;

        tracing::info!(user = %owner, emi = %emi.id, period = %emi.period(), "EMI added");
        Ok(emi)
    }

    /// Replace an EMI's item, amount, period and tenure
    pub fn update(&self, owner: UserId, id: EmiId, input: EmiInput) -> FinanceResult<Emi> {
        let input = input
            .validated()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let emi = self.storage.write(|db| {
            let emi = db
                .emis
                .iter_mut()
                .find(|e| e.id == id && e.user_id == owner)
                .ok_or_else(|| FinanceError::emi_not_found(id.to_string()))?;
            emi.apply(input);
            Ok(emi.clone())
        })?;

        tracing::info!(user = %owner, emi = %id, "EMI updated");
        Ok(emi)
    }

    /// Remove an EMI; unknown IDs are a successful no-op
    pub fn delete(&self, owner: UserId, id: EmiId) -> FinanceResult<bool> {
        if self.get(owner, id)?.is_none() {
            tracing::debug!(user = %owner, emi = %id, "delete of unknown EMI ignored");
            return Ok(false);
        }

        self.storage.write(|db| {
            db.emis.retain(|e| !(e.id == id && e.user_id == owner));
            Ok(())
        })?;

        tracing::info!(user = %owner, emi = %id, "EMI removed");
        Ok(true)
    }
}
