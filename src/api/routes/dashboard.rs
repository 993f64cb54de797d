use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use crate::api::models::WindowParams;
use crate::api::AppState;
use crate::errors::DashboardError;
use crate::models::PnlReport;
use crate::reporting::assemble_report;

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> Result<Json<PnlReport>, DashboardError> {
    let window = params.window()?;
    let report = assemble_report(
        &state.db,
        state.config.company_name(),
        &window,
        Utc::now().date_naive(),
    )?;
    Ok(Json(report))
}
