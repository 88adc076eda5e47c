//! Display formatting for terminal output
//!
//! Table renderings of members, EMIs, expenses and users for the CLI.

pub mod records;

pub use records::{format_emi_list, format_expense_list, format_member_list, format_user_list};

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Width of the widest value in a column, never narrower than its header
fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Milk", 10), "Milk");
        assert_eq!(truncate("Refrigerator EMI", 10), "Refrige...");
        assert_eq!(truncate("abcdef", 2), "..");
        // multi-byte characters are counted, not bytes
        assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
    }

    #[test]
    fn test_column_width() {
        assert_eq!(column_width("Name", ["Al", "Asha"].into_iter()), 4);
        assert_eq!(column_width("Name", ["Lakshmi"].into_iter()), 7);
        assert_eq!(column_width("Name", std::iter::empty()), 4);
    }
}
