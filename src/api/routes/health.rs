use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "pnl-dashboard",
        "version": env!("CARGO_PKG_VERSION"),
        "git_hash": option_env!("PNL_GIT_HASH").unwrap_or("dev"),
        "built_at": option_env!("PNL_BUILD_TIMESTAMP").unwrap_or("unknown"),
    }))
}
