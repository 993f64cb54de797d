use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{error, warn};
use crate::errors::DashboardError;

impl IntoResponse for DashboardError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            DashboardError::Authentication(_) => StatusCode::UNAUTHORIZED,
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::Conflict(_) => StatusCode::CONFLICT,
            DashboardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            DashboardError::NotFound(what) => format!("{} not found", what),
            DashboardError::Authentication(msg)
            | DashboardError::Conflict(msg)
            | DashboardError::InvalidInput(msg) => msg.clone(),
            other => other.to_string(),
        };

        let class = self.classify();
        if class.client_fault {
            warn!(error_type = class.error_type, status = status.as_u16(), error = %message, "Request rejected");
        } else {
            error!(error_type = class.error_type, status = status.as_u16(), error = %self, "Request failed");
        }

        (status, Json(json!({"error": message}))).into_response()
    }
}
