use chrono::NaiveDate;
use crate::errors::DashboardError;
use crate::models::Invoice;
use super::Database;

impl Database {
    pub fn upsert_invoice(&self, invoice: &Invoice) -> Result<(), DashboardError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO invoices (id, project_id, amount, status, due_date) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET project_id = excluded.project_id, amount = excluded.amount,
                 status = excluded.status, due_date = excluded.due_date",
            rusqlite::params![
                invoice.id,
                invoice.project_id,
                invoice.amount,
                invoice.status.as_str(),
                invoice.due_date,
            ],
        ).map_err(|e| DashboardError::Database(format!("Failed to save invoice: {}", e)))?;
        Ok(())
    }

    /// `(pending, overdue)` invoice counts as of `today`. A pending invoice
    /// past its due date counts as overdue.
    pub fn invoice_counts(&self, today: NaiveDate) -> Result<(u64, u64), DashboardError> {
        let conn = self.lock()?;
        let today = today.format("%Y-%m-%d").to_string();
        let (pending, overdue): (i64, i64) = conn.query_row(
            "SELECT
                 COALESCE(SUM(CASE WHEN status = 'pending' AND due_date >= ?1 THEN 1 ELSE 0 END), 0),
                 COALESCE(SUM(CASE WHEN status = 'overdue' OR (status = 'pending' AND due_date < ?1) THEN 1 ELSE 0 END), 0)
             FROM invoices",
            rusqlite::params![today],
            |row| Ok((row.get(0)?, row.get(1)?)),
        ).map_err(|e| DashboardError::Database(format!("Query error: {}", e)))?;
        Ok((pending.max(0) as u64, overdue.max(0) as u64))
    }
}
