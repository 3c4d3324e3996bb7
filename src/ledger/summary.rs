//! Rollups over a transaction slice: totals, per-month and per-category buckets,
//! and progress against the monthly expense goal.

use std::{collections::BTreeMap, fmt};

use chrono::Datelike;
use serde::Serialize;

use super::{
    category::Category,
    settings::Settings,
    transaction::{Transaction, TransactionKind},
};

/// Calendar month used as a rollup key; orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(txn: &Transaction) -> Self {
        Self::new(txn.date.year(), txn.date.month())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub name: String,
    pub income: f64,
    pub expenses: f64,
}

impl CategoryTotals {
    fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            income: 0.0,
            expenses: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    /// Percentage of the goal consumed, clamped to `[0, 100]`.
    pub progress: f64,
    /// Goal minus expenses; negative once the goal is exceeded.
    pub remaining: f64,
    pub goal: f64,
}

pub fn total_for(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|txn| txn.kind == kind)
        .map(|txn| txn.value.get())
        .sum()
}

pub fn monthly_totals(transactions: &[Transaction]) -> BTreeMap<MonthKey, MonthlyTotals> {
    let mut months: BTreeMap<MonthKey, MonthlyTotals> = BTreeMap::new();
    for txn in transactions {
        let bucket = months.entry(MonthKey::of(txn)).or_default();
        let value = txn.value.get();
        match txn.kind {
            TransactionKind::Income => {
                bucket.income += value;
                bucket.balance += value;
            }
            TransactionKind::Expense => {
                bucket.expenses += value;
                bucket.balance -= value;
            }
        }
    }
    months
}

pub fn category_totals(
    transactions: &[Transaction],
    settings: &Settings,
) -> BTreeMap<Category, CategoryTotals> {
    let language = settings.locale_config().language;
    let mut buckets: BTreeMap<Category, CategoryTotals> = Category::ALL
        .iter()
        .map(|category| {
            (
                category.clone(),
                CategoryTotals::empty(category.display_name(language)),
            )
        })
        .collect();
    for txn in transactions {
        let bucket = buckets
            .entry(txn.category.clone())
            .or_insert_with(|| CategoryTotals::empty(txn.category.code()));
        match txn.kind {
            TransactionKind::Income => bucket.income += txn.value.get(),
            TransactionKind::Expense => bucket.expenses += txn.value.get(),
        }
    }
    buckets
}

pub fn goal_progress(total_expenses: f64, settings: &Settings) -> GoalProgress {
    let goal = settings.effective_goal();
    let progress = (total_expenses * 100.0 / goal).clamp(0.0, 100.0);
    GoalProgress {
        progress,
        remaining: goal - total_expenses,
        goal,
    }
}
