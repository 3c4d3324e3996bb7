//! Command-line front end over [`Ledger`](crate::ledger::Ledger).

mod output;

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    errors::LedgerError,
    ledger::{
        Amount, Category, ExportFormat, Ledger, ReportPeriod, SettingsPatch, SortField, SortOrder,
        Transaction, TransactionFilter, TransactionKind,
    },
    storage::JsonFileStorage,
    utils,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("transaction #{0} not found")]
    NotFound(u64),
}

#[derive(Parser, Debug)]
#[command(
    name = "finance_cli",
    version,
    about = "Track income and expenses, monthly rollups and goal progress."
)]
pub struct Cli {
    /// Ledger data file (defaults to the configured file in the app directory)
    #[arg(long, global = true, env = "FINANCE_CORE_DATA")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new transaction.
    Add(TransactionArgs),
    /// Replace every field of an existing transaction.
    Update {
        id: u64,
        #[command(flatten)]
        fields: TransactionArgs,
    },
    /// Delete a transaction.
    Remove { id: u64 },
    /// Show one transaction.
    Show { id: u64 },
    /// List transactions, optionally filtered and sorted.
    List(ListArgs),
    /// Balance, total income and total expenses.
    Summary,
    /// Income, expenses and balance per month.
    Monthly,
    /// Income and expenses per category.
    Categories,
    /// Progress against the monthly expense goal.
    Goal,
    /// Print the ledger as JSON or CSV.
    Export {
        #[arg(long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load a JSON export (use `-` for stdin).
    Import { file: PathBuf },
    /// Show settings, or change the ones passed.
    Settings(SettingsArgs),
    /// Show the app config, or change the values passed.
    Config(ConfigArgs),
    /// Plain-text financial report.
    Report {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

#[derive(Args, Debug)]
pub struct TransactionArgs {
    /// Date as YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,
    #[arg(long)]
    pub description: String,
    /// food, transport, housing, health, education, entertainment or other
    #[arg(long)]
    pub category: String,
    #[arg(long = "type", value_enum)]
    pub kind: KindArg,
    #[arg(long)]
    pub value: f64,
    #[arg(long, default_value = "")]
    pub notes: String,
}

impl TransactionArgs {
    fn into_transaction(self) -> Result<Transaction, LedgerError> {
        let value = Amount::new(self.value)?;
        Ok(Transaction::new(
            self.date,
            self.description,
            Category::from_code(&self.category),
            self.kind.into(),
            value,
        )
        .with_notes(self.notes))
    }
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long = "type", value_enum)]
    pub kind: Option<KindArg>,
    #[arg(long)]
    pub from: Option<NaiveDate>,
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Only the last N days, ending today
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub last_days: Option<u32>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, value_enum)]
    pub sort_by: Option<SortArg>,
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,
}

impl ListArgs {
    fn into_filter(self, today: NaiveDate) -> TransactionFilter {
        let filter = TransactionFilter {
            category: self.category.as_deref().map(Category::from_code),
            kind: self.kind.map(Into::into),
            start_date: self.from,
            end_date: self.to,
            search: self.search,
            sort_by: self.sort_by.map(Into::into),
            sort_order: self.order.map(Into::into),
        };
        match self.last_days {
            Some(days) => filter.last_days(today, days),
            None => filter,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long)]
    pub locale: Option<String>,
    #[arg(long)]
    pub monthly_goal: Option<f64>,
    #[arg(long, action = clap::ArgAction::Set)]
    pub show_charts: Option<bool>,
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Store the ledger in this file from now on
    #[arg(long, conflicts_with = "default_data_file")]
    pub data_file: Option<PathBuf>,
    /// Go back to the data file in the app directory
    #[arg(long)]
    pub default_data_file: bool,
    /// `tracing` filter directive, e.g. finance_core=debug
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl ConfigArgs {
    fn apply(self, config: &mut Config) -> bool {
        let mut changed = false;
        if let Some(path) = self.data_file {
            config.data_file = Some(path);
            changed = true;
        }
        if self.default_data_file {
            config.data_file = None;
            changed = true;
        }
        if let Some(filter) = self.log_filter {
            config.log_filter = Some(filter);
            changed = true;
        }
        changed
    }
}

impl From<SettingsArgs> for SettingsPatch {
    fn from(args: SettingsArgs) -> Self {
        SettingsPatch {
            currency: args.currency,
            locale: args.locale,
            monthly_goal: args.monthly_goal,
            show_charts: args.show_charts,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SortArg {
    Date,
    Value,
    Description,
}

impl From<SortArg> for SortField {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Date => SortField::Date,
            SortArg::Value => SortField::Value,
            SortArg::Description => SortField::Description,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

/// Parses process arguments, opens the ledger and runs the requested command.
pub fn run_cli() -> Result<(), CliError> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    let manager = ConfigManager::new();
    let config = manager.load()?;
    utils::init_tracing(config.log_filter.as_deref());

    let data_file = cli
        .data
        .clone()
        .unwrap_or_else(|| manager.resolve_data_file(&config));
    tracing::debug!(data_file = %data_file.display(), "opening ledger");
    let mut ledger = Ledger::open(Box::new(JsonFileStorage::new(data_file)));
    execute(&mut ledger, cli.command)
}

pub fn execute(ledger: &mut Ledger, command: Command) -> Result<(), CliError> {
    match command {
        Command::Add(fields) => {
            let stored = ledger.add(fields.into_transaction()?)?;
            println!("Added transaction #{}", stored.id);
            output::print_transaction(&stored, ledger.settings());
        }
        Command::Update { id, fields } => {
            let replacement = fields.into_transaction()?.with_id(id);
            if !ledger.update(replacement) {
                return Err(CliError::NotFound(id));
            }
            println!("Updated transaction #{id}");
        }
        Command::Remove { id } => {
            if !ledger.remove(id) {
                return Err(CliError::NotFound(id));
            }
            println!("Removed transaction #{id}");
        }
        Command::Show { id } => {
            let txn = ledger.get(id).ok_or(CliError::NotFound(id))?;
            output::print_transaction(txn, ledger.settings());
        }
        Command::List(args) => {
            let rows = ledger.list(&args.into_filter(Local::now().date_naive()));
            if rows.is_empty() {
                println!("No transactions found.");
            }
            for txn in &rows {
                output::print_transaction(txn, ledger.settings());
            }
        }
        Command::Summary => output::print_summary(ledger),
        Command::Monthly => output::print_monthly(ledger),
        Command::Categories => output::print_categories(ledger),
        Command::Goal => output::print_goal(ledger),
        Command::Export { format, output } => {
            let rendered = ledger.export(format.into())?;
            match output {
                Some(path) => {
                    fs::write(&path, rendered)?;
                    println!("Exported to {}", path.display());
                }
                None if rendered.ends_with('\n') => print!("{rendered}"),
                None => println!("{rendered}"),
            }
        }
        Command::Import { file } => {
            let data = if file.as_os_str() == "-" {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                fs::read_to_string(&file)?
            };
            ledger.import(&data, ExportFormat::Json)?;
            println!("Imported {} transactions", ledger.len());
        }
        Command::Settings(args) => {
            let patch = SettingsPatch::from(args);
            if !patch.is_empty() {
                ledger.update_settings(patch);
            }
            output::print_settings(ledger.settings());
        }
        Command::Config(args) => configure(&ConfigManager::new(), args)?,
        Command::Report { from, to } => {
            println!("{}", ledger.report(ReportPeriod::new(from, to)));
        }
    }
    Ok(())
}

fn configure(manager: &ConfigManager, args: ConfigArgs) -> Result<(), CliError> {
    let mut config = manager.load()?;
    if args.apply(&mut config) {
        manager.save(&config)?;
        tracing::info!(path = %manager.path().display(), "config saved");
    }
    output::print_config(manager, &config);
    Ok(())
}
