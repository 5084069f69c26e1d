use askama::Template;

use crate::error::AppResult;
use crate::forms::CategoryDraft;
use crate::models::{Category, CategoryType, CategoryUpdate};
use crate::services::analytics::category_color;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "categories.txt", escape = "none")]
pub struct CategoriesTemplate {
    pub sections: Vec<CategorySection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySection {
    pub title: &'static str,
    pub kind: &'static str,
    pub rows: Vec<CategoryListRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryListRow {
    pub id: i64,
    pub name: String,
    pub color: String,
}

impl CategoriesTemplate {
    /// Group categories into income and expense sections, keeping backend order.
    pub fn new(categories: &[Category], only: Option<CategoryType>) -> Self {
        let kinds: &[CategoryType] = match only {
            Some(CategoryType::Income) => &[CategoryType::Income],
            Some(CategoryType::Expense) => &[CategoryType::Expense],
            None => &[CategoryType::Income, CategoryType::Expense],
        };

        let sections = kinds
            .iter()
            .map(|kind| CategorySection {
                title: kind.label(),
                kind: kind.as_str(),
                rows: categories
                    .iter()
                    .filter(|c| c.category_type == *kind)
                    .map(|c| CategoryListRow {
                        id: c.id,
                        name: c.name.clone(),
                        color: category_color(&c.name),
                    })
                    .collect(),
            })
            .collect();

        Self { sections }
    }
}

pub async fn list(state: &AppState, kind: Option<CategoryType>) -> AppResult<String> {
    state.require_user()?;

    let categories = match kind {
        Some(kind) => state.categories().list_by_type(kind).await?,
        None => state.categories().list().await?,
    };

    let rendered = CategoriesTemplate::new(&categories, kind).render()?;
    Ok(rendered.trim().to_string())
}

pub async fn add(state: &AppState, name: &str, kind: CategoryType) -> AppResult<String> {
    state.require_user()?;

    let existing = state.categories().list().await?;
    let draft = CategoryDraft {
        name: name.to_string(),
        kind,
        editing_id: None,
    };
    let body = draft.validate(&existing)?;

    let created = state.categories().create(&body).await?;
    Ok(format!(
        "Added {} category \"{}\" (#{})",
        created.category_type, created.name, created.id
    ))
}

pub async fn edit(
    state: &AppState,
    id: i64,
    name: Option<&str>,
    kind: Option<CategoryType>,
) -> AppResult<String> {
    state.require_user()?;

    let current = state.categories().get(id).await?;
    let existing = state.categories().list().await?;

    let mut draft = CategoryDraft::from_existing(&current);
    if let Some(name) = name {
        draft.name = name.to_string();
    }
    if let Some(kind) = kind {
        draft.kind = kind;
    }
    let body = draft.validate(&existing)?;

    let updated = state
        .categories()
        .update(id, &CategoryUpdate::from(body))
        .await?;
    Ok(format!("Updated category \"{}\" (#{})", updated.name, updated.id))
}

pub async fn delete(state: &AppState, id: i64) -> AppResult<String> {
    state.require_user()?;
    state.categories().delete(id).await?;
    Ok(format!("Deleted category #{}", id))
}
