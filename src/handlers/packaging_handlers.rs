use axum::{response::IntoResponse, Extension, Json};

use crate::app_state::AppState;

/// Serves the build descriptor of the mobile client
pub async fn get_build_descriptor(Extension(state): Extension<AppState>) -> impl IntoResponse {
    Json(state.build.as_ref().clone())
}
