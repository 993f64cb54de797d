use chrono::Utc;
use serde_json::{json, Value};
use crate::analytics::coerce::finite_or_zero;
use crate::errors::DashboardError;
use crate::models::{FinancialRow, ReportWindow};
use super::Database;

impl Database {
    /// Record revenue and costs for one project month, replacing any earlier
    /// figures for the same month.
    pub fn upsert_financials(
        &self,
        project_id: &str,
        month: &str,
        revenue: f64,
        costs: f64,
    ) -> Result<(), DashboardError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO project_financials (project_id, month, revenue, costs, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(project_id, month) DO UPDATE SET revenue = excluded.revenue, costs = excluded.costs, updated_at = excluded.updated_at",
            rusqlite::params![project_id, month, revenue, costs, Utc::now().to_rfc3339()],
        ).map_err(|e| DashboardError::Database(format!("Failed to save financials: {}", e)))?;
        Ok(())
    }

    /// One row per project month inside the window, grouped by project in
    /// creation order.
    pub fn financial_rows(&self, window: &ReportWindow) -> Result<Vec<FinancialRow>, DashboardError> {
        self.query_financial_rows(window, None)
    }

    /// Financial rows of a single project inside the window, by month.
    pub fn project_financial_rows(
        &self,
        project_id: &str,
        window: &ReportWindow,
    ) -> Result<Vec<FinancialRow>, DashboardError> {
        self.query_financial_rows(window, Some(project_id))
    }

    fn query_financial_rows(
        &self,
        window: &ReportWindow,
        project_id: Option<&str>,
    ) -> Result<Vec<FinancialRow>, DashboardError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT p.id, p.name, f.revenue, f.costs
             FROM project_financials f JOIN projects p ON p.id = f.project_id
             WHERE (?1 IS NULL OR f.month >= ?1) AND (?2 IS NULL OR f.month <= ?2)
               AND (?3 IS NULL OR f.project_id = ?3)
             ORDER BY p.rowid, f.month"
        ).map_err(|e| DashboardError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(
            rusqlite::params![window.date_from, window.date_to, project_id],
            |row: &rusqlite::Row| {
                let id: String = row.get(0)?;
                let name: String = row.get(1)?;
                let revenue: Option<f64> = row.get(2)?;
                let costs: Option<f64> = row.get(3)?;
                Ok(FinancialRow::new(
                    &id,
                    &name,
                    finite_or_zero(revenue.unwrap_or(0.0)),
                    finite_or_zero(costs.unwrap_or(0.0)),
                ))
            },
        ).map_err(|e| DashboardError::Database(format!("Query error: {}", e)))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| DashboardError::Database(format!("Row error: {}", e)))?);
        }
        Ok(results)
    }

    /// Company-wide monthly totals from `start_month` onwards, as loose JSON
    /// records for the revenue trend normalizer.
    pub fn monthly_revenue(&self, start_month: Option<&str>) -> Result<Value, DashboardError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT month, SUM(revenue), SUM(costs), SUM(COALESCE(revenue, 0)) - SUM(COALESCE(costs, 0))
             FROM project_financials
             WHERE (?1 IS NULL OR month >= ?1)
             GROUP BY month ORDER BY month"
        ).map_err(|e| DashboardError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![start_month], |row: &rusqlite::Row| {
            Ok(json!({
                "month": row.get::<_, String>(0)?,
                "revenue": row.get::<_, Option<f64>>(1)?,
                "costs": row.get::<_, Option<f64>>(2)?,
                "profit": row.get::<_, Option<f64>>(3)?,
            }))
        }).map_err(|e| DashboardError::Database(format!("Query error: {}", e)))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| DashboardError::Database(format!("Row error: {}", e)))?);
        }
        Ok(Value::Array(results))
    }
}
