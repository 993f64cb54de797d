use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::models::{Project, ProjectStatus, ProjectSummary};

/// A row of the projects table: a financial rollup plus project metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRow {
    #[serde(flatten)]
    pub summary: ProjectSummary,
    pub client: Option<String>,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    Revenue,
    Costs,
    #[default]
    Profit,
    Margin,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "project_name" => Ok(Self::Name),
            "revenue" | "actual_revenue" => Ok(Self::Revenue),
            "costs" | "actual_costs" => Ok(Self::Costs),
            "profit" => Ok(Self::Profit),
            "margin" | "profit_margin" => Ok(Self::Margin),
            other => Err(format!("unknown sort field '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectQuery {
    pub search: Option<String>,
    pub status: Option<ProjectStatus>,
    pub sort: SortField,
    pub order: SortOrder,
    pub limit: usize,
    pub offset: usize,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            sort: SortField::default(),
            order: SortOrder::default(),
            limit: 50,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPage {
    /// Matching rows before pagination.
    pub total: usize,
    pub projects: Vec<ProjectRow>,
}

/// Attach project metadata to summaries. Every project gets a row; projects
/// with no financial rows in the window show zeroed figures.
pub fn join_projects(projects: &[Project], summaries: Vec<ProjectSummary>) -> Vec<ProjectRow> {
    let mut by_id: HashMap<String, ProjectSummary> = summaries
        .into_iter()
        .map(|s| (s.project_id.clone(), s))
        .collect();

    projects
        .iter()
        .map(|project| ProjectRow {
            summary: by_id
                .remove(&project.id)
                .unwrap_or_else(|| ProjectSummary::empty(&project.id, &project.name)),
            client: project.client.clone(),
            status: project.status,
        })
        .collect()
}

/// Filter, sort and paginate table rows. Ties keep their incoming order.
pub fn apply_query(rows: Vec<ProjectRow>, query: &ProjectQuery) -> ProjectPage {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matching: Vec<ProjectRow> = rows
        .into_iter()
        .filter(|row| query.status.map_or(true, |status| row.status == status))
        .filter(|row| match &needle {
            Some(needle) => matches_search(row, needle),
            None => true,
        })
        .collect();

    matching.sort_by(|a, b| {
        let ord = compare(a, b, query.sort);
        match query.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    let total = matching.len();
    let projects = matching.into_iter().skip(query.offset).take(query.limit).collect();
    ProjectPage { total, projects }
}

fn matches_search(row: &ProjectRow, needle: &str) -> bool {
    row.summary.project_name.to_lowercase().contains(needle)
        || row
            .client
            .as_deref()
            .is_some_and(|client| client.to_lowercase().contains(needle))
}

fn compare(a: &ProjectRow, b: &ProjectRow, field: SortField) -> Ordering {
    let (a, b) = (&a.summary, &b.summary);
    match field {
        SortField::Name => a.project_name.to_lowercase().cmp(&b.project_name.to_lowercase()),
        SortField::Revenue => a.actual_revenue.total_cmp(&b.actual_revenue),
        SortField::Costs => a.actual_costs.total_cmp(&b.actual_costs),
        SortField::Profit => a.profit.total_cmp(&b.profit),
        SortField::Margin => a.profit_margin.total_cmp(&b.profit_margin),
    }
}
