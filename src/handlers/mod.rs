//! Command handlers.
//!
//! Each handler fetches what it needs through [`AppState`](crate::state::AppState),
//! derives its view once and returns the rendered output. Printing and error
//! reporting are left to the binary.

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod transactions;

use crate::filters::format_signed_amount;
use crate::models::TransactionWithCategory;

/// Pre-formatted transaction line shared by the dashboard and the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub kind: String,
    pub amount: String,
}

impl From<&TransactionWithCategory> for TransactionRow {
    fn from(value: &TransactionWithCategory) -> Self {
        let kind = value.listed_type();
        Self {
            id: value.transaction.id,
            date: value.transaction.date_key().to_string(),
            description: value.transaction.description.clone(),
            category: value.category_name_or_default().to_string(),
            kind: kind.map(|k| k.as_str()).unwrap_or("").to_string(),
            amount: format_signed_amount(value.transaction.amount, kind),
        }
    }
}
