use serde::Deserialize;
use crate::analytics::{ProjectQuery, SortField, SortOrder};
use crate::errors::DashboardError;
use crate::models::{ProjectStatus, ReportWindow};

const MAX_PAGE_SIZE: usize = 500;

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub id: Option<String>,
    pub name: String,
    pub client: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct WindowParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl WindowParams {
    pub fn window(&self) -> Result<ReportWindow, DashboardError> {
        ReportWindow::parse(self.from.as_deref(), self.to.as_deref())
    }
}

#[derive(Deserialize, Default)]
pub struct ProjectListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl ProjectListParams {
    pub fn window(&self) -> Result<ReportWindow, DashboardError> {
        ReportWindow::parse(self.from.as_deref(), self.to.as_deref())
    }

    pub fn query(&self) -> Result<ProjectQuery, DashboardError> {
        let defaults = ProjectQuery::default();
        Ok(ProjectQuery {
            search: self.search.clone(),
            status: parse_optional::<ProjectStatus>(self.status.as_deref())?,
            sort: parse_optional::<SortField>(self.sort.as_deref())?.unwrap_or(defaults.sort),
            order: parse_optional::<SortOrder>(self.order.as_deref())?.unwrap_or(defaults.order),
            limit: self.limit.unwrap_or(defaults.limit).min(MAX_PAGE_SIZE),
            offset: self.offset.unwrap_or(0),
        })
    }
}

#[derive(Deserialize, Default)]
pub struct RevenueParams {
    pub period: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ExportParams {
    pub format: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct EventsParams {
    pub limit: Option<usize>,
}

/// Blank or absent means "not given"; anything else must parse.
fn parse_optional<T>(raw: Option<&str>) -> Result<Option<T>, DashboardError>
where
    T: std::str::FromStr<Err = String>,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse::<T>().map(Some).map_err(DashboardError::InvalidInput),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_params_defaults() {
        let query = ProjectListParams::default().query().unwrap();
        assert_eq!(query, ProjectQuery::default());
    }

    #[test]
    fn test_project_params_parse() {
        let params = ProjectListParams {
            status: Some("on_hold".to_string()),
            sort: Some("name".to_string()),
            order: Some("asc".to_string()),
            limit: Some(10_000),
            ..Default::default()
        };
        let query = params.query().unwrap();
        assert_eq!(query.status, Some(ProjectStatus::OnHold));
        assert_eq!(query.sort, SortField::Name);
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(query.limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_project_params_reject_unknown_sort() {
        let params = ProjectListParams { sort: Some("colour".to_string()), ..Default::default() };
        assert!(matches!(params.query(), Err(DashboardError::InvalidInput(_))));
    }

    #[test]
    fn test_blank_status_ignored() {
        let params = ProjectListParams { status: Some(" ".to_string()), ..Default::default() };
        assert_eq!(params.query().unwrap().status, None);
    }
}
