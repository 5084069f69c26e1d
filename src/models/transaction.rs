use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryType};
use super::lenient::{deserialize_amount, deserialize_optional_id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<i64>,
    pub category_id: i64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    /// ISO 8601 date. The backend sometimes appends a time component.
    pub date: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Transaction {
    /// The `YYYY-MM-DD` prefix of the date, used for ordering.
    pub fn date_key(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }

    /// Month number taken from the two-digit month segment of the date.
    pub fn month_number(&self) -> Option<u32> {
        self.date
            .get(5..7)
            .and_then(|m| m.parse::<u32>().ok())
            .filter(|m| (1..=12).contains(m))
    }
}

/// The slice of a category a transaction needs once joined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

impl From<&Category> for CategoryRef {
    fn from(value: &Category) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            category_type: value.category_type,
        }
    }
}

/// A transaction joined with its category.
///
/// The join happens once per data refresh; consumers never look categories up
/// by id themselves. A missing or stale `category_id` leaves `category` empty,
/// and each consumer applies its own policy to that case:
///
/// * [`resolved_type`](Self::resolved_type) classifies it as an expense,
/// * [`breakdown_name`](Self::breakdown_name) leaves it out of the breakdown,
/// * [`listed_type`](Self::listed_type) reports no type, so only an "all"
///   filter matches it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionWithCategory {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: Option<CategoryRef>,
}

impl TransactionWithCategory {
    pub fn join(transactions: &[Transaction], categories: &[Category]) -> Vec<Self> {
        let mut by_id: HashMap<i64, &Category> = HashMap::with_capacity(categories.len());
        for category in categories {
            by_id.entry(category.id).or_insert(category);
        }

        transactions
            .iter()
            .map(|transaction| Self {
                transaction: transaction.clone(),
                category: by_id
                    .get(&transaction.category_id)
                    .map(|c| CategoryRef::from(*c)),
            })
            .collect()
    }

    /// Join a single transaction against the category list.
    pub fn join_one(transaction: Transaction, categories: &[Category]) -> Self {
        let category = categories
            .iter()
            .find(|c| c.id == transaction.category_id)
            .map(CategoryRef::from);
        Self {
            transaction,
            category,
        }
    }

    /// Classification used for totals and the monthly series.
    pub fn resolved_type(&self) -> CategoryType {
        self.category
            .as_ref()
            .map(|c| c.category_type)
            .unwrap_or(CategoryType::Expense)
    }

    /// Key used for the expense breakdown. `None` excludes the transaction.
    pub fn breakdown_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// Type shown in the transaction list and matched by its type filter.
    pub fn listed_type(&self) -> Option<CategoryType> {
        self.category.as_ref().map(|c| c.category_type)
    }

    pub fn category_name_or_default(&self) -> &str {
        self.breakdown_name().unwrap_or("Unknown")
    }

    pub fn has_category(&self) -> bool {
        self.category.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub category_id: i64,
    pub amount: f64,
    pub description: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl From<NewTransaction> for TransactionUpdate {
    fn from(value: NewTransaction) -> Self {
        Self {
            category_id: Some(value.category_id),
            amount: Some(value.amount),
            description: Some(value.description),
            date: Some(value.date),
        }
    }
}

/// Server-side filters for `GET /transactions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category_type: Option<CategoryType>,
}
