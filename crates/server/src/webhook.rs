//! Chat webhook: a message from a phone becomes a transaction of that phone.
//!
//! The sender is not authenticated: whoever calls the endpoint chooses the
//! phone the transaction is recorded for.

use api_types::webhook::{INVALID_MESSAGE, IngestResult, MessageIn};
use axum::{Json, extract::State};
use engine::IngestOutcome;

use crate::{ServerError, server::ServerState};

pub async fn whatsapp(
    State(state): State<ServerState>,
    Json(payload): Json<MessageIn>,
) -> Result<Json<IngestResult>, ServerError> {
    let outcome = state
        .engine
        .ingest(&payload.phone, &payload.message)
        .await?;

    let result = match outcome {
        IngestOutcome::Created { transaction_id } => IngestResult::Created {
            success: true,
            transaction_id,
        },
        IngestOutcome::InvalidMessage => IngestResult::Rejected {
            error: INVALID_MESSAGE.to_string(),
        },
    };
    Ok(Json(result))
}
