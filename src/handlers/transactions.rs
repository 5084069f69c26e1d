use askama::Template;
use tracing::debug;

use crate::cli::{TransactionAddArgs, TransactionEditArgs, TransactionListArgs};
use crate::error::AppResult;
use crate::filters::TransactionFilter;
use crate::forms::TransactionDraft;
use crate::handlers::TransactionRow;
use crate::models::{CategoryType, TransactionQuery, TransactionUpdate, TransactionWithCategory};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "transactions.txt", escape = "none")]
pub struct TransactionsTemplate {
    pub period_label: String,
    pub rows: Vec<TransactionRow>,
    pub shown: usize,
    pub total: usize,
}

pub async fn list(state: &AppState, args: &TransactionListArgs) -> AppResult<String> {
    state.require_user()?;

    let range = args.period.resolve();
    let mut query = TransactionQuery {
        limit: args.limit,
        offset: args.offset,
        category_id: args.category,
        ..Default::default()
    };
    range.apply_to(&mut query);

    let (transactions, _) = state.load_joined(&query).await?;

    let filter = TransactionFilter {
        search: args.search.clone(),
        kind: args.kind,
    };
    let rows: Vec<TransactionRow> = filter
        .apply(&transactions)
        .into_iter()
        .map(TransactionRow::from)
        .collect();

    let period_label = if range.is_unbounded() {
        String::new()
    } else {
        range.display_label()
    };

    let template = TransactionsTemplate {
        period_label,
        shown: rows.len(),
        total: transactions.len(),
        rows,
    };
    Ok(template.render()?)
}

pub async fn add(state: &AppState, args: &TransactionAddArgs) -> AppResult<String> {
    state.require_user()?;

    let mut draft = TransactionDraft::new();
    draft.set_kind(args.kind);
    draft.description = args.description.clone();
    draft.amount = args.amount.clone();
    if let Some(date) = args.date {
        draft.date = Some(date);
    }
    draft.category_id = resolve_category(state, &args.category, draft.kind).await?;

    let body = draft.validate()?;
    let created = state.transactions().create(&body).await?;
    Ok(format!("Added transaction #{}", created.id))
}

pub async fn edit(state: &AppState, args: &TransactionEditArgs) -> AppResult<String> {
    state.require_user()?;

    let existing = state.transactions().get(args.id).await?;
    let categories = state.categories().list().await?;
    let current = TransactionWithCategory::join_one(existing, &categories);

    let mut draft = TransactionDraft::from_existing(&current);
    if let Some(kind) = args.kind {
        draft.set_kind(kind);
    }
    if let Some(description) = &args.description {
        draft.description = description.clone();
    }
    if let Some(amount) = &args.amount {
        draft.amount = amount.clone();
    }
    if let Some(date) = args.date {
        draft.date = Some(date);
    }
    if let Some(category) = &args.category {
        draft.category_id = match category.trim().parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => categories
                .iter()
                .find(|c| c.has_name(category.trim()) && c.category_type == draft.kind)
                .map(|c| c.id),
        };
    }

    let body = draft.validate()?;
    let updated = state
        .transactions()
        .update(args.id, &TransactionUpdate::from(body))
        .await?;
    Ok(format!("Updated transaction #{}", updated.id))
}

pub async fn delete(state: &AppState, id: i64) -> AppResult<String> {
    state.require_user()?;
    state.transactions().delete(id).await?;
    Ok(format!("Deleted transaction #{}", id))
}

/// Accept either a category id or a category name of the given kind.
///
/// An unknown name resolves to `None`, which the draft reports as a missing
/// field.
async fn resolve_category(
    state: &AppState,
    category: &str,
    kind: CategoryType,
) -> AppResult<Option<i64>> {
    let category = category.trim();
    if category.is_empty() {
        return Ok(None);
    }
    if let Ok(id) = category.parse::<i64>() {
        return Ok(Some(id));
    }

    let candidates = state.categories().list_by_type(kind).await?;
    let found = candidates.iter().find(|c| c.has_name(category)).map(|c| c.id);
    debug!(name = category, kind = %kind, found = ?found, "Resolved category by name");
    Ok(found)
}
