use crate::analytics::coerce::finite_or_zero;
use crate::models::{profit_margin, DashboardCounts, DashboardStats, ProjectSummary, ReportWindow};

/// Roll project summaries up into company-wide dashboard statistics.
pub fn build_dashboard_stats(
    company_name: &str,
    window: &ReportWindow,
    projects: &[ProjectSummary],
    counts: DashboardCounts,
) -> DashboardStats {
    let total_revenue = finite_or_zero(projects.iter().map(|p| p.actual_revenue).sum());
    let total_costs = finite_or_zero(projects.iter().map(|p| p.actual_costs).sum());
    let total_profit = finite_or_zero(total_revenue - total_costs);

    DashboardStats {
        company_name: company_name.to_string(),
        date_from: window.date_from.clone(),
        date_to: window.date_to.clone(),
        total_revenue,
        total_costs,
        total_profit,
        profit_margin: profit_margin(total_profit, total_revenue),
        project_count: projects.len(),
        active_projects: counts.active_projects,
        pending_invoices: counts.pending_invoices,
        overdue_invoices: counts.overdue_invoices,
    }
}
