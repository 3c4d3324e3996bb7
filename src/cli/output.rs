use colored::Colorize;

use crate::{
    config::{Config, ConfigManager},
    currency::format_currency_value,
    ledger::{Ledger, Settings, Transaction, TransactionKind},
};

fn money(amount: f64, settings: &Settings) -> String {
    format_currency_value(amount, &settings.currency_code(), &settings.locale_config())
}

fn signed(amount: f64, settings: &Settings) -> String {
    let text = money(amount, settings);
    if amount < 0.0 {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

pub fn print_transaction(txn: &Transaction, settings: &Settings) {
    let language = settings.locale_config().language;
    let value = match txn.kind {
        TransactionKind::Income => txn.formatted_value(settings).green(),
        TransactionKind::Expense => txn.formatted_value(settings).red(),
    };
    let mut line = format!(
        "#{:<4} {}  {:<8} {:<15} {:>14}  {}",
        txn.id,
        txn.formatted_date(settings),
        txn.kind.label(language),
        txn.category_name(settings),
        value,
        txn.description
    );
    if !txn.notes.is_empty() {
        line.push_str(&format!("  ({})", txn.notes.dimmed()));
    }
    println!("{line}");
}

pub fn print_summary(ledger: &Ledger) {
    let settings = ledger.settings();
    println!("Balance:  {}", signed(ledger.balance(), settings));
    println!("Income:   {}", money(ledger.total_income(), settings));
    println!("Expenses: {}", money(ledger.total_expenses(), settings));
}

pub fn print_monthly(ledger: &Ledger) {
    let settings = ledger.settings();
    let months = ledger.monthly_data();
    if months.is_empty() {
        println!("No transactions recorded.");
        return;
    }
    for (month, totals) in &months {
        println!(
            "{:<8} income {}  expenses {}  balance {}",
            month.to_string(),
            money(totals.income, settings),
            money(totals.expenses, settings),
            signed(totals.balance, settings)
        );
    }
}

pub fn print_categories(ledger: &Ledger) {
    let settings = ledger.settings();
    for (category, totals) in &ledger.category_data() {
        println!(
            "{:<14} {:<15} income {}  expenses {}",
            category.code(),
            totals.name,
            money(totals.income, settings),
            money(totals.expenses, settings)
        );
    }
}

pub fn print_goal(ledger: &Ledger) {
    let settings = ledger.settings();
    let goal = ledger.goal_progress();
    println!("Goal:      {}", money(goal.goal, settings));
    println!("Progress:  {:.1}%", goal.progress);
    println!("Remaining: {}", signed(goal.remaining, settings));
}

pub fn print_config(manager: &ConfigManager, config: &Config) {
    println!("config file: {}", manager.path().display());
    println!("data file:   {}", manager.resolve_data_file(config).display());
    println!(
        "log filter:  {}",
        config
            .log_filter
            .as_deref()
            .unwrap_or(crate::utils::DEFAULT_LOG_DIRECTIVE)
    );
}

pub fn print_settings(settings: &Settings) {
    println!("currency:    {}", settings.currency);
    println!("locale:      {}", settings.locale);
    println!("monthlyGoal: {}", settings.monthly_goal);
    println!("showCharts:  {}", settings.show_charts);
}
