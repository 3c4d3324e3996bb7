use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::{settings::Settings, summary::GoalProgress};
use crate::currency::{format_currency_value, format_date, Language};

/// Date range the report was requested for; open ends read as "beginning"/"current".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ReportPeriod {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }
}

/// Snapshot of the dashboard figures, rendered as plain text via `Display`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialReport {
    pub balance: f64,
    pub income: f64,
    pub expenses: f64,
    pub goal: GoalProgress,
    pub transaction_count: usize,
    pub period: ReportPeriod,
    pub settings: Settings,
}

struct Labels {
    title: &'static str,
    balance: &'static str,
    income: &'static str,
    expenses: &'static str,
    goal: &'static str,
    goal_done: &'static str,
    remaining: &'static str,
    exceeded: &'static str,
    count: &'static str,
    period: &'static str,
    to: &'static str,
    beginning: &'static str,
    current: &'static str,
}

const PORTUGUESE: Labels = Labels {
    title: "RELATÓRIO FINANCEIRO",
    balance: "Saldo Atual",
    income: "Total de Receitas",
    expenses: "Total de Despesas",
    goal: "Meta Mensal",
    goal_done: "concluído",
    remaining: "Valor restante",
    exceeded: "Valor excedido",
    count: "Número de transações",
    period: "Período",
    to: "até",
    beginning: "Início",
    current: "Atual",
};

const ENGLISH: Labels = Labels {
    title: "FINANCIAL REPORT",
    balance: "Current Balance",
    income: "Total Income",
    expenses: "Total Expenses",
    goal: "Monthly Goal",
    goal_done: "used",
    remaining: "Remaining",
    exceeded: "Exceeded by",
    count: "Number of transactions",
    period: "Period",
    to: "to",
    beginning: "Beginning",
    current: "Current",
};

impl fmt::Display for FinancialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locale = self.settings.locale_config();
        let code = self.settings.currency_code();
        let labels = match locale.language {
            Language::Portuguese => &PORTUGUESE,
            Language::English => &ENGLISH,
        };
        let money = |amount: f64| format_currency_value(amount, &code, &locale);
        let bound = |date: Option<NaiveDate>, open: &str| {
            date.map(|d| format_date(&locale, d))
                .unwrap_or_else(|| open.to_string())
        };

        writeln!(f, "{}", labels.title)?;
        writeln!(f, "{}", "=".repeat(labels.title.chars().count()))?;
        writeln!(f)?;
        writeln!(f, "{}: {}", labels.balance, money(self.balance))?;
        writeln!(f, "{}: {}", labels.income, money(self.income))?;
        writeln!(f, "{}: {}", labels.expenses, money(self.expenses))?;
        writeln!(f)?;
        writeln!(
            f,
            "{}: {:.0}% {}",
            labels.goal, self.goal.progress, labels.goal_done
        )?;
        if self.goal.remaining > 0.0 {
            writeln!(f, "{}: {}", labels.remaining, money(self.goal.remaining))?;
        } else {
            writeln!(f, "{}: {}", labels.exceeded, money(self.goal.remaining.abs()))?;
        }
        writeln!(f)?;
        writeln!(f, "{}: {}", labels.count, self.transaction_count)?;
        write!(
            f,
            "{}: {} {} {}",
            labels.period,
            bound(self.period.start, labels.beginning),
            labels.to,
            bound(self.period.end, labels.current)
        )
    }
}
