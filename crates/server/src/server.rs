use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tower_http::cors::CorsLayer;

use std::sync::Arc;

use api_types::status::Status;
use engine::Engine;

use crate::{AuthError, Credentials, ServerError, categories, transactions, user, webhook};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub credentials: Arc<Credentials>,
}

impl ServerState {
    pub fn new(engine: Engine, credentials: Credentials) -> Self {
        Self {
            engine: Arc::new(engine),
            credentials: Arc::new(credentials),
        }
    }
}

/// Resolve the bearer token to a [`engine::User`] and store it in the request
/// extensions.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(TypedHeader(Authorization(bearer))) = auth_header else {
        return Err(AuthError::InvalidToken.into());
    };

    let claims = state.credentials.validate_token(bearer.token())?;
    let Some(user) = state.engine.user_by_phone(&claims.sub).await? else {
        tracing::warn!("token subject {} has no user", claims.sub);
        return Err(AuthError::InvalidToken.into());
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

async fn root() -> Json<Status> {
    Json(Status {
        message: "tally finance backend running".to_string(),
    })
}

pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/users/me", get(user::me))
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route("/transactions/{id}", get(transactions::get))
        .route("/categories", get(categories::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/", get(root))
        .route("/register", post(user::register))
        .route("/token", post(user::token))
        .route("/webhook/whatsapp", post(webhook::whatsapp))
        .merge(protected)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}
