//! Daily expense service

use crate::error::{FinanceError, FinanceResult};
use crate::models::{DailyExpense, ExpenseId, ExpenseInput, Period, UserId};
use crate::storage::Storage;

/// Service for daily expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All expenses owned by `owner`, in insertion order
    pub fn list(&self, owner: UserId) -> FinanceResult<Vec<DailyExpense>> {
        self.storage.read(|db| {
            db.daily_expenses
                .iter()
                .filter(|e| e.user_id == owner)
                .cloned()
                .collect()
        })
    }

    /// Expenses owned by `owner` that fall in `period`
    pub fn for_period(&self, owner: UserId, period: Period) -> FinanceResult<Vec<DailyExpense>> {
        self.storage.read(|db| {
            db.daily_expenses
                .iter()
                .filter(|e| e.user_id == owner && period.matches(e.month, e.year))
                .cloned()
                .collect()
        })
    }

    pub fn get(&self, owner: UserId, id: ExpenseId) -> FinanceResult<Option<DailyExpense>> {
        self.storage.read(|db| {
            db.daily_expenses
                .iter()
                .find(|e| e.id == id && e.user_id == owner)
                .cloned()
        })
    }

    /// Record an expense
    pub fn create(&self, owner: UserId, input: ExpenseInput) -> FinanceResult<DailyExpense> {
        let input = input
            .validated()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let expense = self.storage.write(|db| {
            let expense = DailyExpense::new(db.next_expense_id()?, owner, input);
            db.daily_expenses.push(expense.clone());
            Ok(expense)
        })?;

        tracing::info!(
            user = %owner,
            expense = %expense.id,
            period = %expense.period(),
            "expense added"
        );
        Ok(expense)
    }

    /// Replace an expense's product, price and period
    pub fn update(
        &self,
        owner: UserId,
        id: ExpenseId,
        input: ExpenseInput,
    ) -> FinanceResult<DailyExpense> {
        let input = input
            .validated()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let expense = self.storage.write(|db| {
            let expense = db
                .daily_expenses
                .iter_mut()
                .find(|e| e.id == id && e.user_id == owner)
                .ok_or_else(|| FinanceError::expense_not_found(id.to_string()))?;
            expense.apply(input);
            Ok(expense.clone())
        })?;

        tracing::info!(user = %owner, expense = %id, "expense updated");
        Ok(expense)
    }

    /// Remove an expense; unknown IDs are a successful no-op
    pub fn delete(&self, owner: UserId, id: ExpenseId) -> FinanceResult<bool> {
        if self.get(owner, id)?.is_none() {
            return Ok(false);
        }

        self.storage.write(|db| {
            db.daily_expenses
                .retain(|e| !(e.id == id && e.user_id == owner));
            Ok(())
        })?;

        tracing::info!(user = %owner, expense = %id, "expense removed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Month};
    use tempfile::TempDir;

    const OWNER: UserId = UserId::from_raw(1);

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(temp_dir.path().join("database.json")).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_crud_cycle() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let june = Period::new(Month::June, 2026);

        let milk = service
            .create(OWNER, ExpenseInput::new("Milk", Money::from_cents(5600), june))
            .unwrap();
        let updated = service
            .update(
                OWNER,
                milk.id,
                ExpenseInput::new("Milk (2L)", Money::from_cents(11200), june),
            )
            .unwrap();
        assert_eq!(updated.product_name, "Milk (2L)");
        assert_eq!(updated.created_at, milk.created_at);

        assert!(service.delete(OWNER, milk.id).unwrap());
        assert!(!service.delete(OWNER, milk.id).unwrap());
        assert!(service.list(OWNER).unwrap().is_empty());
    }

    #[test]
    fn test_ids_unique_within_collection() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let june = Period::new(Month::June, 2026);

        let mut ids: Vec<ExpenseId> = (0..20)
            .map(|i| {
                service
                    .create(
                        OWNER,
                        ExpenseInput::new(format!("Item {}", i), Money::from_units(1), june),
                    )
                    .unwrap()
                    .id
            })
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_for_period() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let june = Period::new(Month::June, 2026);

        service
            .create(OWNER, ExpenseInput::new("Milk", Money::from_units(56), june))
            .unwrap();
        service
            .create(
                OWNER,
                ExpenseInput::new("Bread", Money::from_units(40), june.next()),
            )
            .unwrap();

        let in_june = service.for_period(OWNER, june).unwrap();
        assert_eq!(in_june.len(), 1);
        assert_eq!(in_june[0].product_name, "Milk");
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let err = service
            .update(
                OWNER,
                ExpenseId::from_raw(9),
                ExpenseInput::new("X", Money::zero(), Period::new(Month::May, 2026)),
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
