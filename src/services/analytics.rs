use std::collections::HashMap;

use serde::Serialize;

use crate::models::{CategoryType, TransactionWithCategory};

/// How many entries the recent-transactions view shows.
pub const RECENT_TRANSACTIONS_LIMIT: usize = 5;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

impl Totals {
    pub fn from_transactions(transactions: &[TransactionWithCategory]) -> Self {
        let mut total_income = 0.0;
        let mut total_expense = 0.0;

        for transaction in transactions {
            match transaction.resolved_type() {
                CategoryType::Income => total_income += transaction.transaction.amount,
                CategoryType::Expense => total_expense += transaction.transaction.amount,
            }
        }

        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    pub month: &'static str,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryExpenseBucket {
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// Everything the dashboard renders, derived in one pass over the joined data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    #[serde(flatten)]
    pub totals: Totals,
    pub monthly: Vec<MonthlyBucket>,
    pub expenses_by_category: Vec<CategoryExpenseBucket>,
    pub recent: Vec<TransactionWithCategory>,
}

impl DashboardSummary {
    pub fn from_transactions(transactions: &[TransactionWithCategory]) -> Self {
        Self {
            totals: Totals::from_transactions(transactions),
            monthly: monthly_series(transactions),
            expenses_by_category: expenses_by_category(transactions),
            recent: recent_transactions(transactions, RECENT_TRANSACTIONS_LIMIT),
        }
    }
}

/// Three-letter label for a month number (1 = "Jan").
pub fn month_label(month: u32) -> Option<&'static str> {
    MONTH_LABELS.get(month.checked_sub(1)? as usize).copied()
}

/// Income and expense per calendar month, ordered Jan..Dec.
///
/// Months without transactions are left out. The year is ignored, so March
/// of two different years share one bucket. Transactions whose date has no
/// readable month segment are skipped here but still count in [`Totals`].
pub fn monthly_series(transactions: &[TransactionWithCategory]) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<(u32, MonthlyBucket)> = Vec::new();

    for transaction in transactions {
        let Some(month) = transaction.transaction.month_number() else {
            continue;
        };
        let Some(label) = month_label(month) else {
            continue;
        };

        let index = match buckets.iter().position(|(m, _)| *m == month) {
            Some(index) => index,
            None => {
                buckets.push((
                    month,
                    MonthlyBucket {
                        month: label,
                        income: 0.0,
                        expense: 0.0,
                    },
                ));
                buckets.len() - 1
            }
        };

        let bucket = &mut buckets[index].1;
        match transaction.resolved_type() {
            CategoryType::Income => bucket.income += transaction.transaction.amount,
            CategoryType::Expense => bucket.expense += transaction.transaction.amount,
        }
    }

    buckets.sort_by_key(|(month, _)| *month);
    buckets.into_iter().map(|(_, bucket)| bucket).collect()
}

/// Expense totals per category name, in order of first appearance.
///
/// Transactions whose category did not resolve are not counted.
pub fn expenses_by_category(
    transactions: &[TransactionWithCategory],
) -> Vec<CategoryExpenseBucket> {
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<CategoryExpenseBucket> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|t| t.resolved_type() == CategoryType::Expense)
    {
        let Some(name) = transaction.breakdown_name() else {
            continue;
        };

        let index = *index_by_name.entry(name).or_insert_with(|| {
            buckets.push(CategoryExpenseBucket {
                name: name.to_string(),
                value: 0.0,
                color: category_color(name),
            });
            buckets.len() - 1
        });

        buckets[index].value += transaction.transaction.amount;
    }

    buckets
}

/// The newest `limit` transactions by date.
pub fn recent_transactions(
    transactions: &[TransactionWithCategory],
    limit: usize,
) -> Vec<TransactionWithCategory> {
    let mut sorted: Vec<&TransactionWithCategory> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.transaction.date_key().cmp(a.transaction.date_key()));
    sorted.into_iter().take(limit).cloned().collect()
}

/// Deterministic `#rrggbb` color for a category name.
///
/// A 31-multiplier string hash over UTF-16 code units in wrapping 32-bit
/// arithmetic, with the low three bytes rendered as hex. Not collision-free.
pub fn category_color(name: &str) -> String {
    let mut hash: i32 = 0;
    for unit in name.encode_utf16() {
        hash = (unit as i32).wrapping_add((hash << 5).wrapping_sub(hash));
    }

    let mut color = String::with_capacity(7);
    color.push('#');
    for i in 0..3 {
        let value = (hash >> (i * 8)) & 0xff;
        color.push_str(&format!("{:02x}", value));
    }
    color
}
