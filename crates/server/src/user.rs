//! Registration, login and the current user.

use api_types::user::{Token, TokenRequest, UserCreate, UserView};
use axum::{Extension, Form, Json, extract::State, http::StatusCode};
use engine::User;

use crate::{AuthError, ServerError, server::ServerState};

pub(crate) fn map_user(user: User) -> UserView {
    UserView {
        id: user.id,
        name: user.name,
        phone: user.phone,
    }
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    if payload.password.is_empty() {
        return Err(ServerError::Validation(
            "password must not be empty".to_string(),
        ));
    }

    let credentials = state.credentials.clone();
    let password = payload.password;
    let password_hash = tokio::task::spawn_blocking(move || credentials.hash_password(&password))
        .await
        .map_err(|e| AuthError::Hash(format!("hashing task failed: {e}")))??;
    let user = state
        .engine
        .create_user(&payload.name, &payload.phone, Some(&password_hash))
        .await?;

    Ok((StatusCode::CREATED, Json(map_user(user))))
}

/// Exchange phone and password for a bearer token.
pub async fn token(
    State(state): State<ServerState>,
    Form(payload): Form<TokenRequest>,
) -> Result<Json<Token>, ServerError> {
    let user = state.engine.user_by_phone(&payload.username).await?;
    let verified = match user.and_then(|user| user.password_hash) {
        Some(digest) => {
            let credentials = state.credentials.clone();
            let password = payload.password;
            tokio::task::spawn_blocking(move || credentials.verify_password(&password, &digest))
                .await
                .map_err(|e| AuthError::Hash(format!("verification task failed: {e}")))?
        }
        None => false,
    };
    if !verified {
        tracing::warn!("failed login for {}", payload.username);
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.credentials.issue_token(&payload.username)?;
    Ok(Json(Token {
        access_token: token.token,
        token_type: "bearer".to_string(),
    }))
}

pub async fn me(Extension(user): Extension<User>) -> Json<UserView> {
    Json(map_user(user))
}
