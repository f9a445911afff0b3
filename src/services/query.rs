//! Browsing and summarizing expenses
//!
//! The store hands out unordered snapshots; this module applies the search,
//! filter and newest-first ordering that list views expect.

use std::collections::BTreeMap;

use crate::models::{Amount, Expense, PaidStatus};

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Case-insensitive substring of the title
    pub search: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// Paid status
    pub paid: Option<PaidStatus>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by title text
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by paid status
    pub fn paid(mut self, paid: PaidStatus) -> Self {
        self.paid = Some(paid);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check a single expense against the filter
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !expense.title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if expense.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(paid) = self.paid {
            if expense.paid != paid {
                return false;
            }
        }
        true
    }

    /// Filter, sort newest first, then apply the limit
    pub fn apply(&self, expenses: Vec<Expense>) -> Vec<Expense> {
        let mut selected: Vec<Expense> = expenses.into_iter().filter(|e| self.matches(e)).collect();
        sort_newest_first(&mut selected);
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

/// Sort by `created_at` descending, ties broken by id descending
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

/// Totals over a set of expenses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseSummary {
    pub count: usize,
    pub total: Amount,
    pub paid_total: Amount,
    pub unpaid_total: Amount,
    pub unpaid_count: usize,
    /// Totals per category; `None` collects uncategorized expenses
    pub by_category: BTreeMap<Option<String>, Amount>,
}

impl ExpenseSummary {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let mut summary = Self::default();

        for expense in expenses {
            summary.count += 1;
            summary.total += expense.amount;
            if expense.is_paid() {
                summary.paid_total += expense.amount;
            } else {
                summary.unpaid_total += expense.amount;
                summary.unpaid_count += 1;
            }
            *summary
                .by_category
                .entry(expense.category.clone())
                .or_default() += expense.amount;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;

    fn expense(id: i64, title: &str, amount: f64, category: Option<&str>, created_at: i64) -> Expense {
        Expense::manual(
            ExpenseId::new(id),
            title,
            Amount::new(amount),
            category.map(str::to_string),
            created_at,
        )
    }

    fn fixtures() -> Vec<Expense> {
        let mut unpaid = expense(2, "Tiền điện", 450000.0, Some("Hóa đơn"), 200);
        unpaid.paid = PaidStatus::Unpaid;
        vec![
            expense(1, "Cà phê sáng", 25000.0, Some("Ăn uống"), 100),
            unpaid,
            expense(3, "Cà phê chiều", 30000.0, Some("Ăn uống"), 300),
            expense(4, "Gửi xe", 5000.0, None, 300),
        ]
    }

    #[test]
    fn test_default_filter_sorts_newest_first() {
        let ids: Vec<i64> = ExpenseFilter::new()
            .apply(fixtures())
            .iter()
            .map(|e| e.id.value())
            .collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let found = ExpenseFilter::new().search("CÀ PHÊ").apply(fixtures());
        assert_eq!(found.len(), 2);

        let all = ExpenseFilter::new().search("   ").apply(fixtures());
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_category_and_paid_filters() {
        let food = ExpenseFilter::new().category("Ăn uống").apply(fixtures());
        assert_eq!(food.len(), 2);

        let unpaid = ExpenseFilter::new().paid(PaidStatus::Unpaid).apply(fixtures());
        assert_eq!(unpaid.len(), 1);
        assert_eq!(unpaid[0].title, "Tiền điện");
    }

    #[test]
    fn test_limit_applies_after_sort() {
        let top = ExpenseFilter::new().limit(1).apply(fixtures());
        assert_eq!(top[0].id.value(), 4);
    }

    #[test]
    fn test_summary() {
        let summary = ExpenseSummary::from_expenses(&fixtures());
        assert_eq!(summary.count, 4);
        assert_eq!(summary.total, Amount::new(510000.0));
        assert_eq!(summary.unpaid_total, Amount::new(450000.0));
        assert_eq!(summary.paid_total, Amount::new(60000.0));
        assert_eq!(summary.unpaid_count, 1);
        assert_eq!(
            summary.by_category.get(&Some("Ăn uống".to_string())),
            Some(&Amount::new(55000.0))
        );
        assert_eq!(summary.by_category.get(&None), Some(&Amount::new(5000.0)));
    }

    #[test]
    fn test_empty_summary() {
        let summary = ExpenseSummary::from_expenses(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.total, Amount::zero());
    }
}
