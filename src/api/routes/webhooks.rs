use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};
use crate::api::auth::secrets_match;
use crate::api::models::EventsParams;
use crate::api::AppState;
use crate::errors::DashboardError;
use crate::webhook::{apply_sync, SyncPayload};

pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

pub async fn receive_sync(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SyncPayload>,
) -> Result<Json<Value>, DashboardError> {
    if let Some(expected) = state.config.webhook_secret() {
        let given = headers.get(WEBHOOK_SECRET_HEADER).and_then(|v| v.to_str().ok());
        if !given.is_some_and(|g| secrets_match(g, expected)) {
            warn!("Rejected sync webhook with missing or invalid secret");
            return Err(DashboardError::Authentication("Invalid webhook secret".into()));
        }
    }

    let outcome = apply_sync(&state.db, &payload)?;
    let event_id = state.db.record_sync_event("webhook", outcome.accepted, outcome.skipped)?;
    info!(event_id = %event_id, accepted = outcome.accepted, skipped = outcome.skipped, "Sync webhook applied");

    Ok(Json(json!({
        "event_id": event_id,
        "accepted": outcome.accepted,
        "skipped": outcome.skipped,
    })))
}

pub async fn list_sync_events(
    State(state): State<AppState>,
    Query(params): Query<EventsParams>,
) -> Result<Json<Value>, DashboardError> {
    let events = state.db.recent_sync_events(params.limit.unwrap_or(20).min(200))?;
    let total = events.len();
    Ok(Json(json!({ "events": events, "total": total })))
}
