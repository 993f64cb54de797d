pub mod routes;
pub mod models;
pub mod errors;
pub mod auth;

use std::sync::Arc;
use std::time::Duration;
use axum::{middleware, routing::{get, post}, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::DashboardConfig;
use crate::db::Database;
use crate::errors::DashboardError;
use crate::webhook::WebhookNotifier;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<DashboardConfig>,
    pub notifier: WebhookNotifier,
}

impl AppState {
    pub fn new(db: Database, config: DashboardConfig) -> Result<Self, DashboardError> {
        let notifier = WebhookNotifier::new(
            config.webhook_url(),
            Duration::from_secs(config.webhook_timeout_secs()),
        )?;
        Ok(Self { db, config: Arc::new(config), notifier })
    }
}

pub async fn create_app_state(db_path: &str, config: DashboardConfig) -> Result<AppState, DashboardError> {
    let db = Database::new(db_path)?;
    AppState::new(db, config)
}

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/dashboard", get(routes::dashboard::get_dashboard))
        .route("/api/projects", get(routes::projects::list_projects).post(routes::projects::create_project))
        .route("/api/projects/{id}", get(routes::projects::get_project).delete(routes::projects::delete_project))
        .route("/api/revenue/monthly", get(routes::revenue::get_monthly_revenue))
        .route("/api/reports/export", get(routes::reports::export_report))
        .route("/api/webhooks/events", get(routes::webhooks::list_sync_events))
        .route("/api/settings", get(routes::settings::get_settings).put(routes::settings::update_settings))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::api_auth_middleware));

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        // Authenticated by the shared webhook secret instead of the API token
        .route("/api/webhooks/sync", post(routes::webhooks::receive_sync))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
