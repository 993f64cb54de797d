use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, warn};
use crate::analytics::normalize_monthly;
use crate::api::models::RevenueParams;
use crate::api::AppState;
use crate::models::Period;

/// Monthly revenue trend. Never fails: a broken query yields an empty series.
pub async fn get_monthly_revenue(
    State(state): State<AppState>,
    Query(params): Query<RevenueParams>,
) -> Json<Value> {
    let period = match params.period.as_deref() {
        Some(token) => token.parse::<Period>().unwrap_or_else(|e| {
            debug!(error = %e, "Falling back to default period");
            Period::default()
        }),
        None => Period::default(),
    };

    let start = period.start_month(Utc::now().date_naive());
    let raw = state.db.monthly_revenue(start.as_deref()).unwrap_or_else(|e| {
        warn!(error = %e, period = %period, "Monthly revenue query failed");
        json!({"error": e.to_string()})
    });
    let months = normalize_monthly(&raw);

    Json(json!({
        "period": period,
        "start_month": start,
        "months": months,
    }))
}
