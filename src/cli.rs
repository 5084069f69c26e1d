use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::date_utils::{parse_date, DatePreset, DateRange};
use crate::filters::TypeFilter;
use crate::models::CategoryType;

#[derive(Debug, Parser)]
#[command(name = "fintrack", version, about = "Track income and expenses from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session
    Login(LoginArgs),
    /// Create an account and sign in
    Register(RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Totals, monthly overview, expense breakdown and recent activity
    Dashboard(DashboardArgs),
    /// List and manage transactions
    #[command(subcommand)]
    Transactions(TransactionCommand),
    /// List and manage categories
    #[command(subcommand)]
    Categories(CategoryCommand),
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "FINTRACK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "FINTRACK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Date range selection shared by the dashboard and the transaction list.
#[derive(Debug, Clone, Default, Args)]
pub struct PeriodArgs {
    /// this_week, this_month, this_quarter, this_year, last_week,
    /// last_month, last_quarter, last_year or all
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub period: Option<DatePreset>,
    /// First day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,
}

impl PeriodArgs {
    pub fn resolve(&self) -> DateRange {
        match self.period {
            Some(preset) => DateRange::from_preset(preset),
            None => DateRange::from_dates(self.from, self.to),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub period: PeriodArgs,
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum TransactionCommand {
    List(TransactionListArgs),
    Add(TransactionAddArgs),
    Edit(TransactionEditArgs),
    Delete {
        id: i64,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct TransactionListArgs {
    #[command(flatten)]
    pub period: PeriodArgs,
    /// Case-insensitive match on the description
    #[arg(long)]
    pub search: Option<String>,
    /// all, income or expense
    #[arg(long = "type", default_value = "all")]
    pub kind: TypeFilter,
    #[arg(long)]
    pub category: Option<i64>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Args)]
pub struct TransactionAddArgs {
    #[arg(long = "type", default_value = "expense")]
    pub kind: CategoryType,
    #[arg(long)]
    pub description: String,
    /// Positive amount, e.g. 12.50
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,
    /// Category id or name
    #[arg(long)]
    pub category: String,
    /// Defaults to today
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Args)]
pub struct TransactionEditArgs {
    pub id: i64,
    /// Changing the type requires choosing a new category
    #[arg(long = "type")]
    pub kind: Option<CategoryType>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<String>,
    /// Category id or name
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    List {
        /// Only show income or expense categories
        #[arg(long = "type")]
        kind: Option<CategoryType>,
    },
    Add {
        name: String,
        #[arg(long = "type", default_value = "expense")]
        kind: CategoryType,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        kind: Option<CategoryType>,
    },
    Delete {
        id: i64,
    },
}
