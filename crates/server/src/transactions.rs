//! Transactions API endpoints

use api_types::transaction::{TransactionKind as ApiKind, TransactionNew, TransactionView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::User;

use crate::{ServerError, categories::map_category, server::ServerState};

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Expense => ApiKind::Expense,
        engine::TransactionKind::Income => ApiKind::Income,
    }
}

/// Trim a client supplied description; a blank one is dropped.
fn normalize_description(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn map_detail(detail: engine::TransactionDetail) -> TransactionView {
    let tx = detail.transaction;
    TransactionView {
        id: tx.id,
        kind: map_kind(tx.kind),
        amount: tx.amount,
        description: tx.description,
        created_at: tx.created_at,
        user_id: tx.user_id,
        category: detail.category.map(map_category),
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state
        .engine
        .list_transactions(user.id)
        .await?
        .into_iter()
        .map(map_detail)
        .collect();
    Ok(Json(transactions))
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<TransactionView>, ServerError> {
    let detail = state.engine.transaction_for_user(id, user.id).await?;
    Ok(Json(map_detail(detail)))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let kind = match payload.kind {
        ApiKind::Expense => engine::TransactionKind::Expense,
        ApiKind::Income => engine::TransactionKind::Income,
    };

    let tx = state
        .engine
        .create_transaction(engine::NewTransaction {
            kind,
            amount: payload.amount,
            description: normalize_description(payload.description),
            user_id: user.id,
            category_id: payload.category_id,
        })
        .await?;
    let detail = state.engine.transaction(tx.id).await?;

    Ok((StatusCode::CREATED, Json(map_detail(detail))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_is_trimmed_and_blank_dropped() {
        assert_eq!(
            normalize_description(Some(" lunch ".to_string())),
            Some("lunch".to_string())
        );
        assert_eq!(normalize_description(Some("   ".to_string())), None);
        assert_eq!(normalize_description(None), None);
    }
}
