use chrono::NaiveDate;
use tracing::debug;
use crate::analytics::{aggregate_projects, build_dashboard_stats};
use crate::db::Database;
use crate::errors::DashboardError;
use crate::models::{DashboardCounts, PnlReport, ProjectStatus, ReportWindow};

/// Fetch the window's financial rows and counts, then roll them up into a
/// report. Shared by the dashboard endpoint, the export endpoint and the CLI.
pub fn assemble_report(
    db: &Database,
    default_company: &str,
    window: &ReportWindow,
    today: NaiveDate,
) -> Result<PnlReport, DashboardError> {
    let rows = db.financial_rows(window)?;
    let projects = aggregate_projects(&rows);

    let (pending_invoices, overdue_invoices) = db.invoice_counts(today)?;
    let counts = DashboardCounts {
        active_projects: db.count_projects_with_status(ProjectStatus::Active)?,
        pending_invoices,
        overdue_invoices,
    };

    let company = db.company_name(default_company)?;
    let stats = build_dashboard_stats(&company, window, &projects, counts);
    debug!(
        rows = rows.len(),
        projects = projects.len(),
        total_profit = stats.total_profit,
        "Assembled P&L report"
    );

    Ok(PnlReport { stats, projects })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Invoice, InvoiceStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_assemble_report_end_to_end() {
        let db = Database::in_memory().unwrap();
        db.upsert_project("p1", "Alpha", None, ProjectStatus::Active).unwrap();
        db.upsert_project("p2", "Beta", None, ProjectStatus::Completed).unwrap();
        db.upsert_financials("p1", "2024-01", 1000.0, 600.0).unwrap();
        db.upsert_financials("p1", "2024-02", 500.0, 100.0).unwrap();
        db.upsert_financials("p2", "2024-02", 200.0, 300.0).unwrap();
        db.upsert_invoice(&Invoice {
            id: "inv-1".to_string(),
            project_id: "p1".to_string(),
            amount: 500.0,
            status: InvoiceStatus::Pending,
            due_date: "2024-05-01".to_string(),
        }).unwrap();

        let report = assemble_report(&db, "Acme Ltd", &ReportWindow::default(), today()).unwrap();
        assert_eq!(report.projects.len(), 2);
        assert_eq!(report.projects[0].actual_revenue, 1500.0);
        assert_eq!(report.stats.company_name, "Acme Ltd");
        assert_eq!(report.stats.total_revenue, 1700.0);
        assert_eq!(report.stats.total_costs, 1000.0);
        assert_eq!(report.stats.active_projects, 1);
        assert_eq!(report.stats.pending_invoices, 0);
        assert_eq!(report.stats.overdue_invoices, 1);
    }

    #[test]
    fn test_assemble_report_empty_database() {
        let db = Database::in_memory().unwrap();
        let report = assemble_report(&db, "Acme Ltd", &ReportWindow::default(), today()).unwrap();
        assert!(report.projects.is_empty());
        assert_eq!(report.stats.profit_margin, 0.0);
    }
}
