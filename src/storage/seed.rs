//! First-run sample data
//!
//! Three example expenses shown to a new user so the list isn't empty on
//! first launch. Only ever written into an empty store.

use crate::models::{Amount, Expense, ExpenseId, PaidStatus};

/// (title, amount, category, paid)
const SAMPLES: [(&str, f64, &str, PaidStatus); 3] = [
    ("Cà phê", 25_000.0, "Ăn uống", PaidStatus::Paid),
    ("Tiền điện", 450_000.0, "Hóa đơn", PaidStatus::Unpaid),
    ("Xăng xe", 80_000.0, "Di chuyển", PaidStatus::Paid),
];

/// Build the sample records with sequential ids starting at `first_id`
///
/// Creation times step back one second per record so the first sample sorts
/// newest.
pub fn sample_expenses(first_id: ExpenseId, now: i64) -> Vec<Expense> {
    SAMPLES
        .iter()
        .enumerate()
        .map(|(i, (title, amount, category, paid))| {
            let mut expense = Expense::manual(
                ExpenseId::new(first_id.value() + i as i64),
                *title,
                Amount::new(*amount),
                Some((*category).to_string()),
                now - (i as i64) * 1_000,
            );
            expense.paid = *paid;
            expense
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape() {
        let samples = sample_expenses(ExpenseId::FIRST, 10_000);
        assert_eq!(samples.len(), 3);

        let ids: Vec<i64> = samples.iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let unpaid: Vec<&str> = samples
            .iter()
            .filter(|e| !e.is_paid())
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(unpaid, vec!["Tiền điện"]);
    }

    #[test]
    fn test_samples_are_valid() {
        for expense in sample_expenses(ExpenseId::FIRST, 0) {
            expense.validate().unwrap();
        }
    }
}
