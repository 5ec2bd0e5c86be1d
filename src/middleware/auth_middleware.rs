use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
    Extension,
};
use tracing::{debug, error};

use crate::{app_state::AppState, services::jwt_service::validate_token};

/// Requires a bearer token signed with the trigger secret, when one is configured.
pub async fn trigger_auth_middleware(
    Extension(state): Extension<AppState>,
    req: Request<Body>,
    next: Next<Body>,
) -> Result<Response, StatusCode> {
    let secret = match state.trigger_secret.as_deref() {
        Some(secret) => secret,
        None => return Ok(next.run(req).await),
    };

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    match token.and_then(|token| validate_token(token, secret)) {
        Some(source) => {
            debug!("Trigger call authenticated for {}", source);
            Ok(next.run(req).await)
        }
        None => {
            error!("Error: No valid trigger token found.");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
