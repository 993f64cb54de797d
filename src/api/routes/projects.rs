use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use crate::analytics::{aggregate_projects, apply_query, join_projects, ProjectPage};
use crate::api::models::{CreateProjectRequest, ProjectListParams};
use crate::api::AppState;
use crate::errors::DashboardError;
use crate::models::{ProjectStatus, ProjectSummary, ReportWindow};

pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> Result<Json<ProjectPage>, DashboardError> {
    let window = params.window()?;
    let query = params.query()?;

    let rows = state.db.financial_rows(&window)?;
    let summaries = aggregate_projects(&rows);
    let projects = state.db.list_projects()?;

    Ok(Json(apply_query(join_projects(&projects, summaries), &query)))
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Value>), DashboardError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(DashboardError::InvalidInput("Project name is required".into()));
    }

    let status = match req.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse::<ProjectStatus>().map_err(DashboardError::InvalidInput)?,
        None => ProjectStatus::default(),
    };

    let id = match req.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(id) => {
            if state.db.get_project(id)?.is_some() {
                return Err(DashboardError::Conflict(format!("Project {} already exists", id)));
            }
            id.to_string()
        }
        None => uuid::Uuid::new_v4().to_string(),
    };

    let client = req.client.as_deref().map(str::trim).filter(|c| !c.is_empty());
    state.db.upsert_project(&id, name, client, status)?;
    info!(project_id = %id, "Project created");

    let project = state.db.get_project(&id)?
        .ok_or_else(|| DashboardError::Internal("Project vanished after insert".into()))?;
    Ok((StatusCode::CREATED, Json(json!(project))))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, DashboardError> {
    let project = state.db.get_project(&id)?
        .ok_or_else(|| DashboardError::NotFound("Project".into()))?;

    let rows = state.db.project_financial_rows(&id, &ReportWindow::default())?;
    let summary = aggregate_projects(&rows)
        .into_iter()
        .next()
        .unwrap_or_else(|| ProjectSummary::empty(&project.id, &project.name));

    Ok(Json(json!({ "project": project, "summary": summary })))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, DashboardError> {
    if state.db.delete_project(&id)? {
        info!(project_id = %id, "Project deleted");
        Ok(Json(json!({"deleted": true})))
    } else {
        Err(DashboardError::NotFound("Project".into()))
    }
}
