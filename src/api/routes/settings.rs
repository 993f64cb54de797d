use axum::{
    extract::State,
    Json,
};
use serde_json::{json, Value};
use crate::api::AppState;
use crate::errors::DashboardError;

pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<Value>, DashboardError> {
    state.db.get_all_settings().map(Json)
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, DashboardError> {
    let obj = body.as_object()
        .ok_or_else(|| DashboardError::InvalidInput("Settings body must be a JSON object".into()))?;

    for (key, value) in obj {
        let value_str = match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        state.db.set_setting(key, &value_str)?;
    }

    Ok(Json(json!({"updated": obj.len()})))
}
