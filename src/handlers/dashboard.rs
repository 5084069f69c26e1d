use askama::Template;

use crate::cli::DashboardArgs;
use crate::error::AppResult;
use crate::filters::format_amount;
use crate::handlers::TransactionRow;
use crate::models::TransactionQuery;
use crate::services::analytics::DashboardSummary;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "dashboard.txt", escape = "none")]
pub struct DashboardTemplate {
    pub username: String,
    pub period_label: String,
    pub total_income: String,
    pub total_expense: String,
    pub balance: String,
    pub monthly: Vec<MonthlyRow>,
    pub categories: Vec<CategoryRow>,
    pub recent: Vec<TransactionRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRow {
    pub month: &'static str,
    pub income: String,
    pub expense: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub name: String,
    pub value: String,
    pub color: String,
}

impl DashboardTemplate {
    pub fn new(username: &str, period_label: String, summary: &DashboardSummary) -> Self {
        Self {
            username: username.to_string(),
            period_label,
            total_income: format_amount(summary.totals.total_income),
            total_expense: format_amount(summary.totals.total_expense),
            balance: format_amount(summary.totals.balance),
            monthly: summary
                .monthly
                .iter()
                .map(|bucket| MonthlyRow {
                    month: bucket.month,
                    income: format_amount(bucket.income),
                    expense: format_amount(bucket.expense),
                })
                .collect(),
            categories: summary
                .expenses_by_category
                .iter()
                .map(|bucket| CategoryRow {
                    name: bucket.name.clone(),
                    value: format_amount(bucket.value),
                    color: bucket.color.clone(),
                })
                .collect(),
            recent: summary.recent.iter().map(TransactionRow::from).collect(),
        }
    }
}

pub async fn show(state: &AppState, args: &DashboardArgs) -> AppResult<String> {
    let user = state.require_user()?;

    let range = args.period.resolve();
    let mut query = TransactionQuery::default();
    range.apply_to(&mut query);

    let (transactions, _) = state.load_joined(&query).await?;
    let summary = DashboardSummary::from_transactions(&transactions);

    if args.json {
        return Ok(serde_json::to_string_pretty(&summary)?);
    }

    let period_label = if range.is_unbounded() {
        String::new()
    } else {
        range.display_label()
    };
    let template = DashboardTemplate::new(&user.username, period_label, &summary);
    Ok(template.render()?)
}
