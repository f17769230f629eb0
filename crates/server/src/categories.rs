//! Categories API endpoints.

use api_types::category::CategoryView;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub(crate) fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let categories = state
        .engine
        .list_categories()
        .await?
        .into_iter()
        .map(map_category)
        .collect();
    Ok(Json(categories))
}
