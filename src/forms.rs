//! Typed drafts for the add/edit forms.
//!
//! A draft holds raw user input and is turned into a request body by a single
//! `validate` call, which runs before any network request is made.

use chrono::{Local, NaiveDate};

use crate::date_utils::DATE_FORMAT;
use crate::error::{AppError, AppResult};
use crate::models::{Category, CategoryType, NewCategory, NewTransaction, TransactionWithCategory};

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const MSG_INVALID_AMOUNT: &str = "Please enter a valid amount";
pub const MSG_CATEGORY_NAME_REQUIRED: &str = "Please enter a category name";

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: CategoryType,
    pub description: String,
    /// Raw amount text as typed.
    pub amount: String,
    pub category_id: Option<i64>,
    pub date: Option<NaiveDate>,
}

impl TransactionDraft {
    /// Empty draft for a new expense dated today.
    pub fn new() -> Self {
        Self {
            kind: CategoryType::Expense,
            description: String::new(),
            amount: String::new(),
            category_id: None,
            date: Some(Local::now().date_naive()),
        }
    }

    /// Draft seeded from an existing transaction for editing.
    ///
    /// The kind comes from the resolved category and falls back to expense.
    pub fn from_existing(existing: &TransactionWithCategory) -> Self {
        let transaction = &existing.transaction;
        Self {
            kind: existing.resolved_type(),
            description: transaction.description.clone(),
            amount: transaction.amount.to_string(),
            category_id: Some(transaction.category_id),
            date: NaiveDate::parse_from_str(transaction.date_key(), DATE_FORMAT).ok(),
        }
    }

    /// Switch between income and expense. The chosen category belongs to the
    /// previous kind, so it is cleared.
    pub fn set_kind(&mut self, kind: CategoryType) {
        if self.kind != kind {
            self.kind = kind;
            self.category_id = None;
        }
    }

    pub fn validate(&self) -> AppResult<NewTransaction> {
        let description = self.description.trim();
        let amount = self.amount.trim();
        let (Some(category_id), Some(date)) = (self.category_id, self.date) else {
            return Err(AppError::Validation(MSG_FILL_ALL_FIELDS.into()));
        };
        if description.is_empty() || amount.is_empty() {
            return Err(AppError::Validation(MSG_FILL_ALL_FIELDS.into()));
        }

        let amount = amount
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or_else(|| AppError::Validation(MSG_INVALID_AMOUNT.into()))?;

        Ok(NewTransaction {
            category_id,
            amount,
            description: description.to_string(),
            date: date.format(DATE_FORMAT).to_string(),
        })
    }
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub kind: CategoryType,
    /// Id of the category being edited; it is exempt from the duplicate check.
    pub editing_id: Option<i64>,
}

impl CategoryDraft {
    pub fn from_existing(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            kind: category.category_type,
            editing_id: Some(category.id),
        }
    }

    /// Check the draft against the categories already loaded.
    ///
    /// Names compare case-insensitively and only within the same type.
    pub fn validate(&self, existing: &[Category]) -> AppResult<NewCategory> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(MSG_CATEGORY_NAME_REQUIRED.into()));
        }

        let duplicate = existing.iter().any(|c| {
            c.has_name(name) && c.category_type == self.kind && Some(c.id) != self.editing_id
        });
        if duplicate {
            return Err(AppError::Validation(format!(
                "A {} category with this name already exists",
                self.kind
            )));
        }

        Ok(NewCategory {
            name: name.to_string(),
            category_type: self.kind,
        })
    }
}
