use crate::models::TxnType;

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Groceries",
    "Housing",
    "Rent/Mortgage",
    "Utilities",
    "Transportation",
    "Gas/Fuel",
    "Public Transport",
    "Healthcare",
    "Insurance",
    "Entertainment",
    "Shopping",
    "Clothing",
    "Personal Care",
    "Education",
    "Travel",
    "Subscriptions",
    "Gifts & Donations",
    "Fees & Charges",
    "Taxes",
    "Other Expense",
];

pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Rental Income",
    "Dividends",
    "Interest",
    "Bonus",
    "Gift",
    "Refund",
    "Other Income",
];

pub fn categories_for(txn_type: TxnType) -> &'static [&'static str] {
    match txn_type {
        TxnType::Income => INCOME_CATEGORIES,
        TxnType::Expense => EXPENSE_CATEGORIES,
    }
}

pub fn is_valid_for(category: &str, txn_type: TxnType) -> bool {
    categories_for(txn_type).contains(&category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_sizes() {
        assert_eq!(EXPENSE_CATEGORIES.len(), 21);
        assert_eq!(INCOME_CATEGORIES.len(), 11);
    }

    #[test]
    fn test_categories_for_type() {
        assert!(is_valid_for("Groceries", TxnType::Expense));
        assert!(is_valid_for("Salary", TxnType::Income));
        assert!(!is_valid_for("Groceries", TxnType::Income));
        assert!(!is_valid_for("Salary", TxnType::Expense));
        assert!(!is_valid_for("Not A Category", TxnType::Expense));
    }

    #[test]
    fn test_lists_are_disjoint() {
        for cat in EXPENSE_CATEGORIES {
            assert!(!INCOME_CATEGORIES.contains(cat));
        }
    }
}
