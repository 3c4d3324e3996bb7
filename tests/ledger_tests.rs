mod common;

use common::{date, expense, income, sample_ledger};
use finance_core::ledger::{
    Amount, Category, Ledger, MonthKey, SettingsPatch, SortField, SortOrder, Transaction,
    TransactionFilter, TransactionKind, DEFAULT_MONTHLY_GOAL,
};

#[test]
fn ids_are_strictly_increasing_and_unique() {
    let mut ledger = Ledger::in_memory();
    let ids: Vec<u64> = (0..10)
        .map(|i| ledger.add(expense(Category::Other, i as f64)).expect("add").id)
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(ids.first(), Some(&1));
    assert_eq!(ledger.next_id(), 11);
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut ledger = Ledger::in_memory();
    let first = ledger.add(income(10.0)).expect("add");
    let second = ledger.add(income(20.0)).expect("add");
    assert!(ledger.remove(second.id));
    let third = ledger.add(income(30.0)).expect("add");
    assert!(third.id > second.id);
    assert!(ledger.get(first.id).is_some());
}

#[test]
fn remove_then_get_is_not_found() {
    let mut ledger = sample_ledger();
    assert!(ledger.remove(2));
    assert!(ledger.get(2).is_none());
    assert_eq!(ledger.len(), 1);
}

#[test]
fn remove_unknown_id_leaves_sequence_unchanged() {
    let mut ledger = sample_ledger();
    let before = ledger.transactions().to_vec();
    assert!(!ledger.remove(999));
    assert_eq!(ledger.transactions(), before.as_slice());
}

#[test]
fn update_unknown_id_fails_without_side_effects() {
    let mut ledger = sample_ledger();
    let before = ledger.transactions().to_vec();
    let ghost = expense(Category::Health, 50.0).with_id(42);
    assert!(!ledger.update(ghost));
    assert_eq!(ledger.transactions(), before.as_slice());
}

#[test]
fn update_replaces_every_field_including_notes() {
    let mut ledger = Ledger::in_memory();
    let stored = ledger
        .add(expense(Category::Food, 12.0).with_notes("lunch with team"))
        .expect("add");

    let replacement = Transaction::new(
        date(2024, 2, 1),
        "Bus pass",
        Category::Transport,
        TransactionKind::Expense,
        Amount::new(80.0).unwrap(),
    )
    .with_id(stored.id);
    assert!(ledger.update(replacement.clone()));

    let current = ledger.get(stored.id).expect("still present");
    assert_eq!(current, &replacement);
    assert_eq!(current.notes, "");
    assert_eq!(current.category, Category::Transport);
}

#[test]
fn balance_equals_income_minus_expenses() {
    let mut ledger = sample_ledger();
    ledger.add(expense(Category::Housing, 450.25)).expect("add");
    ledger.add(income(99.5)).expect("add");
    assert_eq!(
        ledger.balance(),
        ledger.total_income() - ledger.total_expenses()
    );
}

#[test]
fn sample_aggregates_match_expected_values() {
    let ledger = sample_ledger();
    assert_eq!(ledger.balance(), 700.0);
    assert_eq!(ledger.total_income(), 1000.0);
    assert_eq!(ledger.total_expenses(), 300.0);

    let categories = ledger.category_data();
    assert_eq!(categories[&Category::Food].expenses, 300.0);
    assert_eq!(categories[&Category::Transport].expenses, 0.0);
    assert_eq!(categories[&Category::Other].income, 1000.0);
    assert_eq!(categories.len(), Category::ALL.len());
    assert_eq!(categories[&Category::Food].name, "Alimentação");
}

#[test]
fn list_filters_by_category_and_sorts_descending() {
    let mut ledger = Ledger::in_memory();
    ledger.add(expense(Category::Food, 100.0)).expect("add");
    ledger.add(expense(Category::Transport, 50.0)).expect("add");
    ledger.add(expense(Category::Food, 200.0)).expect("add");

    let filter = TransactionFilter::new()
        .category(Category::Food)
        .sort(SortField::Value, SortOrder::Desc);
    let values: Vec<f64> = ledger
        .list(&filter)
        .iter()
        .map(|txn| txn.value.get())
        .collect();
    assert_eq!(values, vec![200.0, 100.0]);
    assert_eq!(ledger.len(), 3, "listing must not mutate the ledger");
}

#[test]
fn sort_without_order_defaults_to_ascending() {
    let mut ledger = Ledger::in_memory();
    ledger.add(expense(Category::Food, 30.0)).expect("add");
    ledger.add(expense(Category::Food, 10.0)).expect("add");
    ledger.add(expense(Category::Food, 20.0)).expect("add");

    let filter = TransactionFilter {
        sort_by: Some(SortField::Value),
        ..TransactionFilter::default()
    };
    let values: Vec<f64> = ledger.list(&filter).iter().map(|t| t.value.get()).collect();
    assert_eq!(values, vec![10.0, 20.0, 30.0]);
}

#[test]
fn descending_sort_keeps_ties_in_insertion_order() {
    let mut ledger = Ledger::in_memory();
    let a = ledger.add(expense(Category::Food, 10.0)).expect("add");
    let b = ledger.add(expense(Category::Food, 10.0)).expect("add");
    let c = ledger.add(expense(Category::Food, 50.0)).expect("add");

    let filter = TransactionFilter::new().sort(SortField::Value, SortOrder::Desc);
    let ids: Vec<u64> = ledger.list(&filter).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);
}

#[test]
fn description_sort_ignores_accents_and_case() {
    let mut ledger = Ledger::in_memory();
    for description in ["pão", "Água", "banana", "Ônibus"] {
        let mut txn = expense(Category::Food, 1.0);
        txn.description = description.into();
        ledger.add(txn).expect("add");
    }
    let filter = TransactionFilter::new().sort(SortField::Description, SortOrder::Asc);
    let order: Vec<String> = ledger
        .list(&filter)
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(order, vec!["Água", "banana", "Ônibus", "pão"]);
}

#[test]
fn description_sort_descending() {
    let mut ledger = Ledger::in_memory();
    for description in ["banana", "Água", "pão"] {
        let mut txn = expense(Category::Food, 1.0);
        txn.description = description.into();
        ledger.add(txn).expect("add");
    }
    let filter = TransactionFilter::new().sort(SortField::Description, SortOrder::Desc);
    let order: Vec<String> = ledger
        .list(&filter)
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(order, vec!["pão", "banana", "Água"]);
}

#[test]
fn date_sort_in_both_directions() {
    let mut ledger = Ledger::in_memory();
    for day in [15, 3, 28] {
        let mut txn = expense(Category::Other, day as f64);
        txn.date = date(2024, 4, day);
        ledger.add(txn).expect("add");
    }
    let days = |order| -> Vec<f64> {
        ledger
            .list(&TransactionFilter::new().sort(SortField::Date, order))
            .iter()
            .map(|t| t.value.get())
            .collect()
    };
    assert_eq!(days(SortOrder::Asc), vec![3.0, 15.0, 28.0]);
    assert_eq!(days(SortOrder::Desc), vec![28.0, 15.0, 3.0]);
}

#[test]
fn last_days_window_includes_today() {
    let mut ledger = Ledger::in_memory();
    for day in [1, 4, 10] {
        let mut txn = expense(Category::Other, day as f64);
        txn.date = date(2024, 6, day);
        ledger.add(txn).expect("add");
    }
    let filter = TransactionFilter::new().last_days(date(2024, 6, 10), 6);
    let days: Vec<f64> = ledger.list(&filter).iter().map(|t| t.value.get()).collect();
    assert_eq!(days, vec![4.0, 10.0]);
}

#[test]
fn date_bounds_are_inclusive() {
    let mut ledger = Ledger::in_memory();
    for day in [1, 10, 20, 31] {
        let mut txn = expense(Category::Other, day as f64);
        txn.date = date(2024, 3, day);
        ledger.add(txn).expect("add");
    }
    let filter = TransactionFilter::new().between(Some(date(2024, 3, 10)), Some(date(2024, 3, 20)));
    let days: Vec<f64> = ledger.list(&filter).iter().map(|t| t.value.get()).collect();
    assert_eq!(days, vec![10.0, 20.0]);
}

#[test]
fn search_matches_description_category_name_or_notes() {
    let mut ledger = Ledger::in_memory();
    let mut groceries = expense(Category::Food, 40.0);
    groceries.description = "Supermercado".into();
    ledger.add(groceries).expect("add");
    ledger
        .add(expense(Category::Transport, 5.0).with_notes("Uber to AIRPORT"))
        .expect("add");
    ledger.add(expense(Category::Health, 60.0)).expect("add");

    let by_description = ledger.list(&TransactionFilter::new().search("supermer"));
    assert_eq!(by_description.len(), 1);

    let by_category_name = ledger.list(&TransactionFilter::new().search("saúde"));
    assert_eq!(by_category_name.len(), 1);
    assert_eq!(by_category_name[0].category, Category::Health);

    let by_notes = ledger.list(&TransactionFilter::new().search("airport"));
    assert_eq!(by_notes.len(), 1);
    assert_eq!(by_notes[0].category, Category::Transport);
}

#[test]
fn search_term_is_matched_as_typed() {
    let mut ledger = Ledger::in_memory();
    let mut coffee = expense(Category::Food, 4.0);
    coffee.description = "coffee".into();
    ledger.add(coffee).expect("add");
    let mut beans = expense(Category::Food, 20.0);
    beans.description = "coffee beans".into();
    ledger.add(beans).expect("add");

    let rows = ledger.list(&TransactionFilter::new().search("coffee "));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "coffee beans");

    let spaced = ledger.list(&TransactionFilter::new().search(" "));
    assert_eq!(spaced.len(), 1);

    assert_eq!(ledger.list(&TransactionFilter::new().search("")).len(), 2);
}

#[test]
fn filters_compose_with_and() {
    let mut ledger = sample_ledger();
    ledger.add(expense(Category::Food, 20.0).with_notes("snack")).expect("add");
    let filter = TransactionFilter::new()
        .kind(TransactionKind::Expense)
        .category(Category::Food)
        .search("snack");
    let rows = ledger.list(&filter);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value.get(), 20.0);
}

#[test]
fn monthly_data_has_one_entry_per_month() {
    let mut ledger = Ledger::in_memory();
    let mut march = income(500.0);
    march.date = date(2024, 3, 2);
    ledger.add(march).expect("add");
    let mut march_expense = expense(Category::Food, 120.0);
    march_expense.date = date(2024, 3, 28);
    ledger.add(march_expense).expect("add");
    ledger.add(expense(Category::Food, 80.0)).expect("add");

    let months = ledger.monthly_data();
    assert_eq!(months.len(), 2);
    let march_totals = months[&MonthKey::new(2024, 3)];
    assert_eq!(march_totals.income, 500.0);
    assert_eq!(march_totals.expenses, 120.0);
    assert_eq!(march_totals.balance, 380.0);
    assert_eq!(months[&MonthKey::new(2024, 1)].balance, -80.0);
}

#[test]
fn goal_falls_back_to_default_when_unset() {
    let mut ledger = sample_ledger();
    ledger.update_settings(SettingsPatch {
        monthly_goal: Some(0.0),
        ..SettingsPatch::default()
    });
    let goal = ledger.goal_progress();
    assert_eq!(goal.goal, DEFAULT_MONTHLY_GOAL);
    assert_eq!(goal.progress, 30.0);
    assert_eq!(goal.remaining, 700.0);
}

#[test]
fn goal_progress_stays_within_bounds() {
    let mut ledger = Ledger::in_memory();
    assert_eq!(ledger.goal_progress().progress, 0.0);
    ledger.add(expense(Category::Housing, 1_000_000.0)).expect("add");
    let goal = ledger.goal_progress();
    assert_eq!(goal.progress, 100.0);
    assert!(goal.remaining < 0.0);
}
