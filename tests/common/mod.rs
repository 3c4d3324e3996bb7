#![allow(dead_code)]

use chrono::NaiveDate;
use finance_core::ledger::{Amount, Category, Ledger, Transaction, TransactionKind};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn expense(category: Category, value: f64) -> Transaction {
    Transaction::new(
        date(2024, 1, 15),
        "expense",
        category,
        TransactionKind::Expense,
        Amount::new(value).expect("valid amount"),
    )
}

pub fn income(value: f64) -> Transaction {
    Transaction::new(
        date(2024, 1, 5),
        "salary",
        Category::Other,
        TransactionKind::Income,
        Amount::new(value).expect("valid amount"),
    )
}

/// Ledger holding one 1000 income and one 300 food expense.
pub fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::in_memory();
    ledger.add(income(1000.0)).expect("add");
    ledger.add(expense(Category::Food, 300.0)).expect("add");
    ledger
}
