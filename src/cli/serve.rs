use std::path::Path;
use crate::cli::commands::ServeArgs;
use crate::config::load_config;
use crate::errors::DashboardError;
use crate::api;
use tracing::info;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

pub async fn handle_serve(args: ServeArgs) -> Result<(), DashboardError> {
    let config = load_config(args.config.as_deref().map(Path::new)).await?;

    let server = config.server.clone().unwrap_or_default();
    let host = args.host.or(server.host).unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = args.port.or(server.port).unwrap_or(DEFAULT_PORT);
    let db_path = args.db.unwrap_or_else(|| config.database_path().to_string());

    info!(
        host = %host,
        port,
        db = %db_path,
        auth = config.api_token().is_some(),
        webhook = config.webhook_url().is_some(),
        "Starting API server"
    );

    let state = api::create_app_state(&db_path, config).await?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| DashboardError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
