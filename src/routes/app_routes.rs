// src/routes/app_routes.rs

use axum::middleware::from_fn;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::handlers::packaging_handlers::get_build_descriptor;
use crate::handlers::trigger_handlers::message_created;
use crate::middleware::auth_middleware::trigger_auth_middleware;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/packaging", get(get_build_descriptor))
        .route(
            "/chats/:chat_id/messages/:message_id",
            post(message_created).route_layer(from_fn(trigger_auth_middleware)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}
