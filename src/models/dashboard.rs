use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::errors::DashboardError;
use super::financial::ProjectSummary;

/// Counts sourced from the database rather than derived from financial rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardCounts {
    pub active_projects: u64,
    pub pending_invoices: u64,
    pub overdue_invoices: u64,
}

/// Inclusive month window (`YYYY-MM`) a report covers. Either bound may be open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReportWindow {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl ReportWindow {
    /// Build a window from request bounds given as `YYYY-MM` or `YYYY-MM-DD`.
    /// Blank bounds are open.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, DashboardError> {
        let date_from = from.map(parse_month_bound).transpose()?.flatten();
        let date_to = to.map(parse_month_bound).transpose()?.flatten();

        if let (Some(f), Some(t)) = (&date_from, &date_to) {
            if f > t {
                return Err(DashboardError::InvalidInput(format!(
                    "date_from {} is after date_to {}", f, t
                )));
            }
        }
        Ok(Self { date_from, date_to })
    }
}

fn parse_month_bound(raw: &str) -> Result<Option<String>, DashboardError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    normalize_month(raw).map(Some).ok_or_else(|| DashboardError::InvalidInput(format!(
        "invalid date '{}', expected YYYY-MM or YYYY-MM-DD", raw
    )))
}

/// `YYYY-MM` or `YYYY-MM-DD` → `YYYY-MM`; `None` if neither parses.
pub fn normalize_month(raw: &str) -> Option<String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d"))
        .ok()
        .map(|date| date.format("%Y-%m").to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub company_name: String,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub total_revenue: f64,
    pub total_costs: f64,
    pub total_profit: f64,
    pub profit_margin: f64,
    pub project_count: usize,
    pub active_projects: u64,
    pub pending_invoices: u64,
    pub overdue_invoices: u64,
}

/// Dashboard statistics together with the project rollups they were built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlReport {
    pub stats: DashboardStats,
    pub projects: Vec<ProjectSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_accepts_months_and_dates() {
        let window = ReportWindow::parse(Some("2024-01"), Some("2024-06-30")).unwrap();
        assert_eq!(window.date_from.as_deref(), Some("2024-01"));
        assert_eq!(window.date_to.as_deref(), Some("2024-06"));
    }

    #[test]
    fn test_window_blank_bounds_are_open() {
        let window = ReportWindow::parse(Some(""), None).unwrap();
        assert_eq!(window, ReportWindow::default());
    }

    #[test]
    fn test_window_rejects_garbage() {
        assert!(matches!(
            ReportWindow::parse(Some("last-week"), None),
            Err(DashboardError::InvalidInput(_))
        ));
        assert!(ReportWindow::parse(None, Some("2024-13")).is_err());
    }

    #[test]
    fn test_normalize_month() {
        assert_eq!(normalize_month("2024-03-31").as_deref(), Some("2024-03"));
        assert_eq!(normalize_month(" 2024-03 ").as_deref(), Some("2024-03"));
        assert!(normalize_month("March").is_none());
    }

    #[test]
    fn test_window_rejects_inverted_range() {
        assert!(ReportWindow::parse(Some("2024-06"), Some("2024-01")).is_err());
    }
}
