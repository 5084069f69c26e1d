//! Display helpers for the rendered views.
//!
//! Amounts are shown with a thousands separator and two decimals. Signed
//! amounts carry `+` for income and `-` for expenses, following the type the
//! list view resolves for the transaction.

use std::fmt;
use std::str::FromStr;

use crate::models::{CategoryType, TransactionWithCategory};

/// Format an amount as plain text, e.g. `1,234.50`.
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));
    let whole_str = format_with_thousands(whole, ',');

    if amount < 0.0 && formatted != "0.00" {
        format!("-{}.{}", whole_str, fraction)
    } else {
        format!("{}.{}", whole_str, fraction)
    }
}

/// Format an amount with a sign derived from its type. Untyped rows get no sign.
pub fn format_signed_amount(amount: f64, kind: Option<CategoryType>) -> String {
    match kind {
        Some(CategoryType::Income) => format!("+{}", format_amount(amount)),
        Some(CategoryType::Expense) => format!("-{}", format_amount(amount)),
        None => format_amount(amount),
    }
}

fn format_with_thousands(digits: &str, sep: char) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }
    result
}

/// Type filter of the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Transactions without a resolved category only match `All`.
    pub fn matches(&self, kind: Option<CategoryType>) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == Some(CategoryType::Income),
            Self::Expense => kind == Some(CategoryType::Expense),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown type filter: {}", other)),
        }
    }
}

/// Client-side filter applied to the loaded transaction list.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub search: Option<String>,
    pub kind: TypeFilter,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &TransactionWithCategory) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => transaction
                .transaction
                .description
                .to_lowercase()
                .contains(&term.to_lowercase()),
        };
        matches_search && self.kind.matches(transaction.listed_type())
    }

    /// Filtered view preserving the input order.
    pub fn apply<'a>(
        &self,
        transactions: &'a [TransactionWithCategory],
    ) -> Vec<&'a TransactionWithCategory> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}
