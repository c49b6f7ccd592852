use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    let protected = Router::new()
        .route("/api/system/auth/me", get(system::handlers::auth::current_user))
        .route("/api/system/auth/profile", put(system::handlers::auth::update_profile))
        .route(
            "/api/users/:owner/collections/:collection",
            get(handlers::collections::load).put(handlers::collections::save),
        )
        .layer(middleware::from_fn(system::auth::middleware::require_auth));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/system/auth/register", post(system::handlers::auth::register))
        .route("/api/system/auth/login", post(system::handlers::auth::login))
        .route("/api/system/auth/refresh", post(system::handlers::auth::refresh))
        .route("/api/system/auth/logout", post(system::handlers::auth::logout))
        .merge(protected)
}
