//! Expense CLI commands
//!
//! Everyday record management: list, show, add, edit, toggle, delete, summary.

use clap::Args;

use crate::display::{format_expense_details, format_expense_list, format_summary};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Amount, ExpenseId, PaidStatus};
use crate::services::{ExpenseFilter, ExpenseSummary};
use crate::storage::{ExpenseStore, KeyValueStore};

/// Arguments for `list`
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only titles containing this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only this category
    #[arg(short, long)]
    pub category: Option<String>,
    /// Only paid expenses
    #[arg(long, conflicts_with = "unpaid")]
    pub paid: bool,
    /// Only unpaid expenses
    #[arg(long)]
    pub unpaid: bool,
    /// Number of expenses to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    fn to_filter(&self) -> ExpenseFilter {
        let mut filter = ExpenseFilter::new();
        if let Some(search) = &self.search {
            filter = filter.search(search.clone());
        }
        if let Some(category) = &self.category {
            filter = filter.category(category.clone());
        }
        if self.paid {
            filter = filter.paid(PaidStatus::Paid);
        } else if self.unpaid {
            filter = filter.paid(PaidStatus::Unpaid);
        }
        if let Some(limit) = self.limit {
            filter = filter.limit(limit);
        }
        filter
    }
}

/// Arguments for `edit`; omitted fields keep their current value
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Expense ID (e.g. 3 or #3)
    pub id: String,
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New amount (e.g. "25000" or "25.000")
    #[arg(short, long)]
    pub amount: Option<String>,
    /// New category
    #[arg(short, long, conflicts_with = "clear_category")]
    pub category: Option<String>,
    /// Remove the category
    #[arg(long)]
    pub clear_category: bool,
}

pub fn parse_id(identifier: &str) -> ExpenseResult<ExpenseId> {
    identifier.parse().map_err(|_| {
        ExpenseError::Validation(format!(
            "Invalid expense ID: '{}'. Use a number like 3 or #3",
            identifier
        ))
    })
}

pub fn parse_amount(input: &str) -> ExpenseResult<Amount> {
    Amount::parse(input).map_err(|e| {
        ExpenseError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '25000' or '25.000'. Error: {}",
            input, e
        ))
    })
}

pub fn handle_list<S: KeyValueStore>(
    store: &ExpenseStore<S>,
    args: &ListArgs,
    symbol: &str,
) -> ExpenseResult<()> {
    let expenses = args.to_filter().apply(store.list()?);
    print!("{}", format_expense_list(&expenses, symbol));
    Ok(())
}

pub fn handle_show<S: KeyValueStore>(
    store: &ExpenseStore<S>,
    id: &str,
    symbol: &str,
) -> ExpenseResult<()> {
    let id = parse_id(id)?;
    let expense = store
        .get(id)?
        .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
    print!("{}", format_expense_details(&expense, symbol));
    Ok(())
}

pub fn handle_add<S: KeyValueStore>(
    store: &ExpenseStore<S>,
    title: &str,
    amount: &str,
    category: Option<&str>,
    symbol: &str,
) -> ExpenseResult<()> {
    let amount = parse_amount(amount)?;
    let title = title.trim();
    let id = store.insert(title, amount, category)?;
    println!(
        "Added expense {}: {} {}",
        id,
        title,
        amount.format_with_symbol(symbol)
    );
    Ok(())
}

pub fn handle_edit<S: KeyValueStore>(store: &ExpenseStore<S>, args: &EditArgs) -> ExpenseResult<()> {
    let id = parse_id(&args.id)?;
    let current = store
        .get(id)?
        .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

    let title = args
        .title
        .as_deref()
        .map(str::trim)
        .unwrap_or(current.title.as_str())
        .to_string();
    let amount = match &args.amount {
        Some(raw) => parse_amount(raw)?,
        None => current.amount,
    };
    let category = if args.clear_category {
        None
    } else {
        args.category.clone().or(current.category.clone())
    };

    if !store.update(id, &title, amount, category.as_deref())? {
        return Err(ExpenseError::expense_not_found(id.to_string()));
    }
    println!("Updated expense {}", id);
    Ok(())
}

pub fn handle_toggle<S: KeyValueStore>(store: &ExpenseStore<S>, id: &str) -> ExpenseResult<()> {
    let id = parse_id(id)?;
    let status = store
        .toggle_paid(id)?
        .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
    println!("Expense {} is now {}", id, status);
    Ok(())
}

pub fn handle_delete<S: KeyValueStore>(store: &ExpenseStore<S>, id: &str) -> ExpenseResult<()> {
    let id = parse_id(id)?;
    if store.delete(id)? {
        println!("Deleted expense {}", id);
    } else {
        println!("No expense {}; nothing to delete", id);
    }
    Ok(())
}

pub fn handle_summary<S: KeyValueStore>(
    store: &ExpenseStore<S>,
    args: &ListArgs,
    symbol: &str,
) -> ExpenseResult<()> {
    let expenses = args.to_filter().apply(store.list()?);
    let summary = ExpenseSummary::from_expenses(&expenses);
    print!("{}", format_summary(&summary, symbol));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("#3").unwrap(), ExpenseId::new(3));
        assert!(parse_id("three").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("25.000").unwrap(), Amount::new(25000.0));
        assert!(parse_amount("lots").unwrap_err().is_validation());
    }

    #[test]
    fn test_list_args_to_filter() {
        let args = ListArgs {
            search: Some("cà".into()),
            unpaid: true,
            limit: Some(5),
            ..ListArgs::default()
        };
        let filter = args.to_filter();
        assert_eq!(filter.search.as_deref(), Some("cà"));
        assert_eq!(filter.paid, Some(PaidStatus::Unpaid));
        assert_eq!(filter.limit, Some(5));
        assert_eq!(filter.category, None);
    }
}
