//! Record list formatting
//!
//! Formats members, EMIs, expenses and users as plain-text tables.

use super::{column_width, truncate};
use crate::models::{DailyExpense, Emi, FamilyMember, Money, User};

const MAX_NAME_WIDTH: usize = 30;

/// Format family members as a table with a salary total
pub fn format_member_list(members: &[FamilyMember], currency_symbol: &str) -> String {
    if members.is_empty() {
        return "No family members found.".to_string();
    }

    let names: Vec<String> = members
        .iter()
        .map(|m| truncate(&m.name, MAX_NAME_WIDTH))
        .collect();
    let name_width = column_width("Name", names.iter().map(String::as_str));

    let mut output = String::new();
    output.push_str(&format!(
        "{:<15}  {:<name_width$}  {:>16}\n",
        "ID",
        "Name",
        "Salary",
        name_width = name_width
    ));
    output.push_str(&format!(
        "{:-<15}  {:-<name_width$}  {:->16}\n",
        "",
        "",
        "",
        name_width = name_width
    ));

    for (member, name) in members.iter().zip(&names) {
        output.push_str(&format!(
            "{:<15}  {:<name_width$}  {:>16}\n",
            member.id,
            name,
            member.salary.format_with_symbol(currency_symbol),
            name_width = name_width
        ));
    }

    let total: Money = members.iter().map(|m| m.salary).sum();
    output.push_str(&format!(
        "\n{} member(s), total salary {}\n",
        members.len(),
        total.format_with_symbol(currency_symbol)
    ));

    output
}

/// Format EMIs as a table with an amount total
pub fn format_emi_list(emis: &[Emi], currency_symbol: &str) -> String {
    if emis.is_empty() {
        return "No EMIs found.".to_string();
    }

    let items: Vec<String> = emis
        .iter()
        .map(|e| truncate(&e.item_name, MAX_NAME_WIDTH))
        .collect();
    let periods: Vec<String> = emis.iter().map(|e| e.period().to_string()).collect();
    let tenures: Vec<String> = emis
        .iter()
        .map(|e| match e.tenure() {
            Some((start, end)) => format!("{} - {}", start, end),
            None => String::new(),
        })
        .collect();

    let item_width = column_width("Item", items.iter().map(String::as_str));
    let period_width = column_width("Period", periods.iter().map(String::as_str));

    let mut output = String::new();
    output.push_str(&format!(
        "{:<15}  {:<item_width$}  {:<period_width$}  {:>14}  {}\n",
        "ID",
        "Item",
        "Period",
        "Amount",
        "Tenure",
        item_width = item_width,
        period_width = period_width
    ));
    output.push_str(&format!(
        "{:-<15}  {:-<item_width$}  {:-<period_width$}  {:->14}  {:-<6}\n",
        "",
        "",
        "",
        "",
        "",
        item_width = item_width,
        period_width = period_width
    ));

    for (i, emi) in emis.iter().enumerate() {
        output.push_str(&format!(
            "{:<15}  {:<item_width$}  {:<period_width$}  {:>14}  {}\n",
            emi.id,
            items[i],
            periods[i],
            emi.amount.format_with_symbol(currency_symbol),
            tenures[i],
            item_width = item_width,
            period_width = period_width
        ));
    }

    let total: Money = emis.iter().map(|e| e.amount).sum();
    output.push_str(&format!(
        "\n{} EMI(s), total {}\n",
        emis.len(),
        total.format_with_symbol(currency_symbol)
    ));

    output
}

/// Format daily expenses as a table with a price total
pub fn format_expense_list(expenses: &[DailyExpense], currency_symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let products: Vec<String> = expenses
        .iter()
        .map(|e| truncate(&e.product_name, MAX_NAME_WIDTH))
        .collect();
    let periods: Vec<String> = expenses.iter().map(|e| e.period().to_string()).collect();

    let product_width = column_width("Product", products.iter().map(String::as_str));
    let period_width = column_width("Period", periods.iter().map(String::as_str));

    let mut output = String::new();
    output.push_str(&format!(
        "{:<15}  {:<product_width$}  {:<period_width$}  {:>14}\n",
        "ID",
        "Product",
        "Period",
        "Price",
        product_width = product_width,
        period_width = period_width
    ));
    output.push_str(&format!(
        "{:-<15}  {:-<product_width$}  {:-<period_width$}  {:->14}\n",
        "",
        "",
        "",
        "",
        product_width = product_width,
        period_width = period_width
    ));

    for (i, expense) in expenses.iter().enumerate() {
        output.push_str(&format!(
            "{:<15}  {:<product_width$}  {:<period_width$}  {:>14}\n",
            expense.id,
            products[i],
            periods[i],
            expense.price.format_with_symbol(currency_symbol),
            product_width = product_width,
            period_width = period_width
        ));
    }

    let total: Money = expenses.iter().map(|e| e.price).sum();
    output.push_str(&format!(
        "\n{} expense(s), total {}\n",
        expenses.len(),
        total.format_with_symbol(currency_symbol)
    ));

    output
}

/// Format registered users; password hashes are never shown
pub fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users registered.".to_string();
    }

    let name_width = column_width("Username", users.iter().map(|u| u.username.as_str()));

    let mut output = String::new();
    output.push_str(&format!(
        "{:<15}  {:<name_width$}  {:<10}  {}\n",
        "ID",
        "Username",
        "Mobile",
        "Registered",
        name_width = name_width
    ));
    output.push_str(&format!(
        "{:-<15}  {:-<name_width$}  {:-<10}  {:-<10}\n",
        "",
        "",
        "",
        "",
        name_width = name_width
    ));

    for user in users {
        output.push_str(&format!(
            "{:<15}  {:<name_width$}  {:<10}  {}\n",
            user.id,
            user.username,
            user.mobile,
            user.created_at.format("%Y-%m-%d"),
            name_width = name_width
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        EmiId, EmiInput, ExpenseId, ExpenseInput, MemberId, MemberInput, Month, Period, UserId,
    };

    const OWNER: UserId = UserId::from_raw(1);

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_member_list(&[], "₹"), "No family members found.");
        assert_eq!(format_emi_list(&[], "₹"), "No EMIs found.");
        assert_eq!(format_expense_list(&[], "₹"), "No expenses found.");
        assert_eq!(format_user_list(&[]), "No users registered.");
    }

    #[test]
    fn test_member_list() {
        let members = vec![
            FamilyMember::new(
                MemberId::from_raw(1),
                OWNER,
                MemberInput::new("Asha", Money::from_units(50000)),
            ),
            FamilyMember::new(
                MemberId::from_raw(2),
                OWNER,
                MemberInput::new("Ravi", Money::from_units(40000)),
            ),
        ];

        let output = format_member_list(&members, "₹");
        assert!(output.contains("Asha"));
        assert!(output.contains("₹50,000.00"));
        assert!(output.contains("2 member(s), total salary ₹90,000.00"));
    }

    #[test]
    fn test_emi_list_shows_tenure() {
        let emis = vec![Emi::new(
            EmiId::from_raw(1),
            OWNER,
            EmiInput::new(
                "Car",
                Money::from_units(12000),
                Period::new(Month::March, 2026),
            )
            .with_tenure(
                Period::new(Month::January, 2025),
                Period::new(Month::December, 2027),
            ),
        )];

        let output = format_emi_list(&emis, "₹");
        assert!(output.contains("March 2026"));
        assert!(output.contains("January 2025 - December 2027"));
    }

    #[test]
    fn test_expense_list_total() {
        let period = Period::new(Month::March, 2026);
        let expenses = vec![
            DailyExpense::new(
                ExpenseId::from_raw(1),
                OWNER,
                ExpenseInput::new("Milk", Money::from_cents(5650), period),
            ),
            DailyExpense::new(
                ExpenseId::from_raw(2),
                OWNER,
                ExpenseInput::new("Bread", Money::from_units(40), period),
            ),
        ];

        let output = format_expense_list(&expenses, "$");
        assert!(output.contains("2 expense(s), total $96.50"));
    }
}
