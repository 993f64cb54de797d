use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;
use crate::api::AppState;
use crate::errors::DashboardError;

/// Require `Authorization: Bearer <token>` when an API token is configured.
pub async fn api_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, DashboardError> {
    if let Some(expected_token) = state.config.api_token() {
        let auth_header = request.headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) if secrets_match(token, expected_token) => {}
            Some(_) => {
                warn!(path = %request.uri().path(), "Rejected request with invalid API token");
                return Err(DashboardError::Authentication("Invalid API token".into()));
            }
            None => {
                return Err(DashboardError::Authentication("Missing Authorization header".into()));
            }
        }
    }

    Ok(next.run(request).await)
}

/// Compare secrets without short-circuiting on the first differing byte.
pub(crate) fn secrets_match(given: &str, expected: &str) -> bool {
    let (a, b) = (given.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
