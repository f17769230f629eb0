use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use auth::{AccessToken, AuthConfig, AuthError, Claims, Credentials};
pub use server::{ServerState, router, run_with_listener};

mod auth;
mod categories;
mod server;
mod transactions;
mod user;
mod webhook;

pub mod types {
    pub mod user {
        pub use api_types::user::{Token, TokenRequest, UserCreate, UserView};
    }

    pub mod category {
        pub use api_types::category::CategoryView;
    }

    pub mod transaction {
        pub use api_types::transaction::{TransactionKind, TransactionNew, TransactionView};
    }

    pub mod webhook {
        pub use api_types::webhook::{INVALID_MESSAGE, IngestResult, MessageIn};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Auth(AuthError),
    Validation(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_) | EngineError::InvalidName(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

fn status_for_auth_error(err: &AuthError) -> StatusCode {
    match err {
        AuthError::InvalidCredentials | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
        AuthError::Config(_) | AuthError::Hash(_) | AuthError::Encode(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Auth(err) => {
                let status = status_for_auth_error(&err);
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!("auth failure: {err}");
                    (status, "internal server error".to_string())
                } else {
                    (status, err.to_string())
                }
            }
            ServerError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, err),
        };

        let mut response = (status, Json(Error { error })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<AuthError> for ServerError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let res = ServerError::from(EngineError::InvalidName("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_database_maps_to_500() {
        let err = sea_orm_err();
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_rejection_maps_to_401_with_challenge() {
        let res = ServerError::from(AuthError::InvalidToken).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn auth_internal_failure_maps_to_500() {
        let res = ServerError::from(AuthError::Hash("boom".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_maps_to_422() {
        let res = ServerError::Validation("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    fn sea_orm_err() -> EngineError {
        EngineError::Database(sea_orm::DbErr::Custom("storage unavailable".to_string()))
    }
}
