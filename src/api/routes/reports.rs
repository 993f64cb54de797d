use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use tracing::info;
use crate::api::models::ExportParams;
use crate::api::AppState;
use crate::errors::DashboardError;
use crate::reporting::{assemble_report, render_report, ReportFormat};

pub async fn export_report(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, DashboardError> {
    let format = match params.format.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(f) => f.parse::<ReportFormat>().map_err(DashboardError::InvalidInput)?,
        None => ReportFormat::default(),
    };
    let window = crate::models::ReportWindow::parse(params.from.as_deref(), params.to.as_deref())?;

    let report = assemble_report(
        &state.db,
        state.config.company_name(),
        &window,
        Utc::now().date_naive(),
    )?;
    let doc = render_report(&report, format)?;
    info!(format = %format, filename = %doc.filename, bytes = doc.body.len(), "Report exported");

    state.notifier.notify("report.exported", json!({
        "format": format.to_string(),
        "filename": doc.filename,
        "date_from": report.stats.date_from,
        "date_to": report.stats.date_to,
        "total_revenue": report.stats.total_revenue,
        "total_profit": report.stats.total_profit,
    }));

    Ok((
        [
            (header::CONTENT_TYPE, doc.content_type.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", doc.filename)),
        ],
        doc.body,
    ))
}
