use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{Notifier, pledges, requests, user};
use api_types::Envelope;
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
    pub notifier: Arc<Notifier>,
}

/// Resolve Basic credentials to a user row with an exact match.
pub(crate) async fn lookup_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model, StatusCode> {
    if username.is_empty() || password.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .filter(user::Column::Password.eq(password))
        .one(db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?
        .ok_or(StatusCode::UNAUTHORIZED)
}

async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(auth_header) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let user = lookup_user(&state.db, auth_header.username(), auth_header.password()).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

async fn health() -> Json<Envelope<()>> {
    Json(Envelope::message("ok"))
}

fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/food-requests/{id}/pledges", post(pledges::create))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/health", get(health))
        .route(
            "/food-requests",
            get(requests::list).post(requests::create),
        )
        .route("/food-requests/{id}", get(requests::get_detail))
        .merge(protected)
        .with_state(state)
}

/// Build the application router. Exposed for in-process testing.
pub fn app(engine: Engine, db: DatabaseConnection, notifier: Notifier) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
        db,
        notifier: Arc::new(notifier),
    })
}

pub async fn run(engine: Engine, db: DatabaseConnection, notifier: Notifier) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, notifier, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    notifier: Notifier,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, db, notifier)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    notifier: Notifier,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, notifier, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
