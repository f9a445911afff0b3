//! Expense display formatting
//!
//! Formats expenses for terminal output in list, detail and summary views.

use crate::models::{Expense, PaidStatus};
use crate::services::query::ExpenseSummary;
use crate::storage::ImportReport;

const TITLE_WIDTH: usize = 24;
const CATEGORY_WIDTH: usize = 14;

fn status_label(paid: PaidStatus) -> &'static str {
    match paid {
        PaidStatus::Paid => "✓ Paid",
        PaidStatus::Unpaid => "⏳ Unpaid",
    }
}

/// Format a single expense as a list row
pub fn format_expense_row(expense: &Expense, symbol: &str) -> String {
    format!(
        "{:>5}  {:<title_w$}  {:>14}  {:<cat_w$}  {}",
        expense.id.to_string(),
        truncate(&expense.title, TITLE_WIDTH),
        expense.amount.format_with_symbol(symbol),
        truncate(expense.category.as_deref().unwrap_or("-"), CATEGORY_WIDTH),
        status_label(expense.paid),
        title_w = TITLE_WIDTH,
        cat_w = CATEGORY_WIDTH,
    )
}

/// Format a list of expenses with a header row
pub fn format_expense_list(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses yet. Add one with 'expense-notes add'.\n".to_string();
    }

    let mut output = format!(
        "{:>5}  {:<title_w$}  {:>14}  {:<cat_w$}  {}\n",
        "ID",
        "Title",
        "Amount",
        "Category",
        "Status",
        title_w = TITLE_WIDTH,
        cat_w = CATEGORY_WIDTH,
    );
    output.push_str(&"-".repeat(5 + 2 + TITLE_WIDTH + 2 + 14 + 2 + CATEGORY_WIDTH + 2 + 9));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, symbol));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!("Title:    {}\n", expense.title));
    output.push_str(&format!("Amount:   {}\n", expense.amount.format_with_symbol(symbol)));
    output.push_str(&format!(
        "Category: {}\n",
        expense.category.as_deref().unwrap_or("(uncategorized)")
    ));
    output.push_str(&format!("Status:   {}\n", status_label(expense.paid)));

    match expense.created_at_utc() {
        Some(created) => output.push_str(&format!(
            "Created:  {}\n",
            created.format("%Y-%m-%d %H:%M:%S UTC")
        )),
        None => output.push_str(&format!("Created:  {} (ms)\n", expense.created_at)),
    }

    output
}

/// Format totals and the per-category breakdown
pub fn format_summary(summary: &ExpenseSummary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expenses: {}\n", summary.count));
    output.push_str(&format!("Total:    {}\n", summary.total.format_with_symbol(symbol)));
    output.push_str(&format!("Paid:     {}\n", summary.paid_total.format_with_symbol(symbol)));
    output.push_str(&format!(
        "Unpaid:   {} ({} open)\n",
        summary.unpaid_total.format_with_symbol(symbol),
        summary.unpaid_count
    ));

    if !summary.by_category.is_empty() {
        output.push_str("\nBy category:\n");
        for (category, total) in &summary.by_category {
            output.push_str(&format!(
                "  {:<width$} {:>14}\n",
                category.as_deref().unwrap_or("(uncategorized)"),
                total.format_with_symbol(symbol),
                width = CATEGORY_WIDTH + 2,
            ));
        }
    }

    output
}

/// One-line outcome of an import
pub fn format_import_report(report: &ImportReport) -> String {
    let mut line = format!("Imported {} expense(s)", report.imported());
    if report.duplicates > 0 {
        line.push_str(&format!(", skipped {} duplicate(s)", report.duplicates));
    }
    if report.invalid > 0 {
        line.push_str(&format!(", skipped {} invalid item(s)", report.invalid));
    }
    line
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, ExpenseId};

    fn sample() -> Expense {
        Expense::manual(
            ExpenseId::new(1),
            "Cà phê",
            Amount::new(25000.0),
            Some("Ăn uống".into()),
            0,
        )
    }

    #[test]
    fn test_empty_list() {
        assert!(format_expense_list(&[], "đ").contains("No expenses yet"));
    }

    #[test]
    fn test_list_contains_rows() {
        let output = format_expense_list(&[sample()], "đ");
        assert!(output.contains("Title"));
        assert!(output.contains("Cà phê"));
        assert!(output.contains("25.000đ"));
        assert!(output.contains("✓ Paid"));
    }

    #[test]
    fn test_details() {
        let mut expense = sample();
        expense.category = None;
        expense.paid = PaidStatus::Unpaid;

        let output = format_expense_details(&expense, "đ");
        assert!(output.contains("#1"));
        assert!(output.contains("(uncategorized)"));
        assert!(output.contains("Unpaid"));
        assert!(output.contains("1970-01-01"));
    }

    #[test]
    fn test_summary_output() {
        let summary = ExpenseSummary::from_expenses(&[sample()]);
        let output = format_summary(&summary, "đ");
        assert!(output.contains("Total:    25.000đ"));
        assert!(output.contains("Ăn uống"));
    }

    #[test]
    fn test_import_report() {
        let report = ImportReport {
            imported_ids: vec![ExpenseId::new(4)],
            duplicates: 2,
            invalid: 0,
        };
        assert_eq!(
            format_import_report(&report),
            "Imported 1 expense(s), skipped 2 duplicate(s)"
        );
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Tiền điện tháng mười", 10), "Tiền đi...");
        assert_eq!(truncate("short", 10), "short");
    }
}
