use std::str::FromStr;

use chrono::{Datelike, Days, Local, Months, NaiveDate};

use crate::models::TransactionQuery;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    ThisWeek,
    ThisMonth,
    ThisQuarter,
    ThisYear,
    LastWeek,
    LastMonth,
    LastQuarter,
    LastYear,
    All,
}

impl FromStr for DatePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "this_week" => Ok(Self::ThisWeek),
            "this_month" => Ok(Self::ThisMonth),
            "this_quarter" => Ok(Self::ThisQuarter),
            "this_year" => Ok(Self::ThisYear),
            "last_week" => Ok(Self::LastWeek),
            "last_month" => Ok(Self::LastMonth),
            "last_quarter" => Ok(Self::LastQuarter),
            "last_year" => Ok(Self::LastYear),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown period '{}', expected one of: {}",
                other,
                DatePreset::all()
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

impl DatePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThisWeek => "this_week",
            Self::ThisMonth => "this_month",
            Self::ThisQuarter => "this_quarter",
            Self::ThisYear => "this_year",
            Self::LastWeek => "last_week",
            Self::LastMonth => "last_month",
            Self::LastQuarter => "last_quarter",
            Self::LastYear => "last_year",
            Self::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ThisWeek => "This Week",
            Self::ThisMonth => "This Month",
            Self::ThisQuarter => "This Quarter",
            Self::ThisYear => "This Year",
            Self::LastWeek => "Last Week",
            Self::LastMonth => "Last Month",
            Self::LastQuarter => "Last Quarter",
            Self::LastYear => "Last Year",
            Self::All => "All Time",
        }
    }

    pub fn all() -> &'static [DatePreset] {
        &[
            Self::ThisWeek,
            Self::ThisMonth,
            Self::ThisQuarter,
            Self::ThisYear,
            Self::LastWeek,
            Self::LastMonth,
            Self::LastQuarter,
            Self::LastYear,
            Self::All,
        ]
    }
}

/// Inclusive date range used as `start_date`/`end_date` filters.
///
/// Either bound may be open; the "all" preset leaves both open so no date
/// filter is sent at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub preset: Option<DatePreset>,
}

impl DateRange {
    pub fn from_preset(preset: DatePreset) -> Self {
        Self::from_preset_on(preset, Local::now().date_naive())
    }

    /// Resolve `preset` relative to `today`.
    pub fn from_preset_on(preset: DatePreset, today: NaiveDate) -> Self {
        let bounds = match preset {
            DatePreset::ThisWeek => Some((week_start(today), week_end(today))),
            DatePreset::LastWeek => {
                let last_week = today - Days::new(7);
                Some((week_start(last_week), week_end(last_week)))
            }
            DatePreset::ThisMonth => Some((month_start(today), month_end(today))),
            DatePreset::LastMonth => {
                let last_month = month_start(today) - Days::new(1);
                Some((month_start(last_month), month_end(last_month)))
            }
            DatePreset::ThisQuarter => Some((quarter_start(today), quarter_end(today))),
            DatePreset::LastQuarter => {
                let last_quarter = quarter_start(today) - Days::new(1);
                Some((quarter_start(last_quarter), quarter_end(last_quarter)))
            }
            DatePreset::ThisYear => Some((year_start(today), year_end(today))),
            DatePreset::LastYear => {
                let last_year = year_start(today) - Days::new(1);
                Some((year_start(last_year), year_end(last_year)))
            }
            DatePreset::All => None,
        };

        Self {
            from: bounds.map(|(from, _)| from),
            to: bounds.map(|(_, to)| to),
            preset: Some(preset),
        }
    }

    pub fn from_dates(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            from,
            to,
            preset: None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Human-readable label, e.g. "This Month (2024-03-01 to 2024-03-31)".
    pub fn display_label(&self) -> String {
        let span = match (self.from, self.to) {
            (Some(from), Some(to)) => {
                format!("{} to {}", from.format(DATE_FORMAT), to.format(DATE_FORMAT))
            }
            (Some(from), None) => format!("from {}", from.format(DATE_FORMAT)),
            (None, Some(to)) => format!("until {}", to.format(DATE_FORMAT)),
            (None, None) => return DatePreset::All.label().to_string(),
        };
        match self.preset {
            Some(preset) => format!("{} ({})", preset.label(), span),
            None => span,
        }
    }

    /// Copy the bounds into the server-side filters.
    pub fn apply_to(&self, query: &mut TransactionQuery) {
        query.start_date = self.from.map(|d| d.format(DATE_FORMAT).to_string());
        query.end_date = self.to.map(|d| d.format(DATE_FORMAT).to_string());
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::from_dates(None, None)
    }
}

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.weekday().num_days_from_monday() as u64)
}

fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Days::new(6)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.day0() as u64)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    start
        .checked_add_months(Months::new(1))
        .map(|next| next - Days::new(1))
        .unwrap_or(start)
}

fn quarter_start(date: NaiveDate) -> NaiveDate {
    let into_quarter = date.month0() % 3;
    month_start(date)
        .checked_sub_months(Months::new(into_quarter))
        .unwrap_or(date)
}

fn quarter_end(date: NaiveDate) -> NaiveDate {
    let start = quarter_start(date);
    start
        .checked_add_months(Months::new(3))
        .map(|next| next - Days::new(1))
        .unwrap_or(start)
}

fn year_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.ordinal0() as u64)
}

fn year_end(date: NaiveDate) -> NaiveDate {
    let start = year_start(date);
    start
        .checked_add_months(Months::new(12))
        .map(|next| next - Days::new(1))
        .unwrap_or(start)
}
