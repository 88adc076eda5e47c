//! Monthly Summary Report
//!
//! Totals a user's income and the EMIs and daily expenses of one month,
//! then grades the month by the share of income left over.
//!
//! Salaries are not time-scoped: every member's salary counts toward every
//! month. EMIs and expenses count only for their own (month, year).

use serde::Serialize;

use crate::error::FinanceResult;
use crate::models::{DailyExpense, Emi, FamilyMember, Money, Period, UserId};
use crate::storage::Storage;

/// Letter grade for a month's savings rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// Inclusive lower bounds in whole percent, best grade first
const GRADE_THRESHOLDS: [(i128, Grade); 4] = [
    (50, Grade::A),
    (30, Grade::B),
    (15, Grade::C),
    (0, Grade::D),
];

impl Grade {
    /// Grade `savings` against `total_salary`.
    ///
    /// Returns `None` unless income is positive. Comparison is done on
    /// minor units (`savings * 100 >= pct * salary`) so boundaries are exact.
    pub fn for_savings(savings: Money, total_salary: Money) -> Option<Self> {
        if !total_salary.is_positive() {
            return None;
        }

        let savings = i128::from(savings.cents()) * 100;
        let salary = i128::from(total_salary.cents());

        let grade = GRADE_THRESHOLDS
            .iter()
            .find(|(pct, _)| savings >= pct * salary)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F);
        Some(grade)
    }

    /// Advice shown next to the grade
    pub fn advice(&self) -> &'static str {
        match self {
            Grade::A => "Excellent! You're saving over half your income. Consider investing the surplus.",
            Grade::B => "Good job! Your savings rate is healthy. Keep it up.",
            Grade::C => "Acceptable, but there is room to improve. Look for expenses you can trim.",
            Grade::D => "Warning: you're saving very little this month. Review your spending.",
            Grade::F => "Critical: spending exceeds income. Cut back on expenses immediately.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Totals and grade for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// The month being summarized
    #[serde(flatten)]
    pub period: Period,
    /// Sum of all members' salaries
    pub total_salary: Money,
    /// Sum of this month's EMIs
    pub total_emi: Money,
    /// Sum of this month's daily expenses
    pub total_expenses: Money,
    /// EMIs plus expenses
    pub total_spent: Money,
    /// Salary minus spending; negative when overspent
    pub remaining: Money,
    pub savings: Money,
    /// Savings as a percentage of salary, when salary is positive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<&'static str>,
}

impl FinancialSummary {
    /// Compute the summary for `period` from a set of records.
    ///
    /// Pure: the result depends only on the arguments, not on their order.
    pub fn compute(
        members: &[FamilyMember],
        emis: &[Emi],
        expenses: &[DailyExpense],
        period: Period,
    ) -> Self {
        let total_salary: Money = members.iter().map(|m| m.salary).sum();

        let total_emi: Money = emis
            .iter()
            .filter(|e| period.matches(e.month, e.year))
            .map(|e| e.amount)
            .sum();

        let total_expenses: Money = expenses
            .iter()
            .filter(|e| period.matches(e.month, e.year))
            .map(|e| e.price)
            .sum();

        let total_spent = total_emi + total_expenses;
        let remaining = total_salary - total_spent;
        let savings = remaining;

        let grade = Grade::for_savings(savings, total_salary);
        let savings_percentage = grade
            .map(|_| savings.cents() as f64 * 100.0 / total_salary.cents() as f64);

        Self {
            period,
            total_salary,
            total_emi,
            total_expenses,
            total_spent,
            remaining,
            savings,
            savings_percentage,
            grade,
            advice: grade.map(|g| g.advice()),
        }
    }

    /// Generate the summary of `owner`'s records for a period
    pub fn generate(storage: &Storage, owner: UserId, period: Period) -> FinanceResult<Self> {
        let snapshot = storage.read(|db| db.snapshot_for(owner))?;
        let summary = Self::compute(
            &snapshot.family_members,
            &snapshot.emis,
            &snapshot.daily_expenses,
            period,
        );

        tracing::debug!(
            user = %owner,
            period = %period,
            grade = ?summary.grade,
            "summary computed"
        );
        Ok(summary)
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!("Monthly Summary - {}\n", self.period));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        for (label, amount) in [
            ("Total Salary", self.total_salary),
            ("Total EMI", self.total_emi),
            ("Daily Expenses", self.total_expenses),
            ("Total Spent", self.total_spent),
            ("Remaining", self.remaining),
        ] {
            output.push_str(&format!("{:<20} {:>20}\n", label, money(amount)));
        }

        output.push_str(&"-".repeat(50));
        output.push('\n');

        match (self.grade, self.savings_percentage) {
            (Some(grade), Some(pct)) => {
                output.push_str(&format!(
                    "{:<20} {:>20}\n",
                    "Savings",
                    format!("{} ({:.1}%)", money(self.savings), pct)
                ));
                output.push_str(&format!("{:<20} {:>20}\n\n", "Grade", grade.as_str()));
                output.push_str(grade.advice());
                output.push('\n');
            }
            _ => {
                output.push_str("No grade: add family members with a salary to see one.\n");
            }
        }

        output
    }
}
