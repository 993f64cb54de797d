//! Applies data pushed by the automation system's sync webhook.
//!
//! Payload records are loosely typed; each one is normalized on its own and
//! either stored or counted as skipped. One bad record never rejects the batch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use crate::analytics::coerce::{coerce_number, coerce_string};
use crate::db::Database;
use crate::errors::DashboardError;
use crate::models::{normalize_month, FinancialRow, Invoice, InvoiceStatus, ProjectStatus};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncPayload {
    #[serde(default)]
    pub projects: Vec<Value>,
    #[serde(default)]
    pub rows: Vec<Value>,
    #[serde(default)]
    pub invoices: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SyncOutcome {
    pub accepted: u64,
    pub skipped: u64,
}

impl SyncOutcome {
    fn tally(&mut self, stored: bool) {
        if stored {
            self.accepted += 1;
        } else {
            self.skipped += 1;
        }
    }
}

/// Store everything usable in `payload`. Projects go first so that rows and
/// invoices in the same batch can refer to them.
pub fn apply_sync(db: &Database, payload: &SyncPayload) -> Result<SyncOutcome, DashboardError> {
    let mut outcome = SyncOutcome::default();

    for record in &payload.projects {
        outcome.tally(apply_project(db, record)?);
    }
    for record in &payload.rows {
        outcome.tally(apply_financial_row(db, record)?);
    }
    for record in &payload.invoices {
        outcome.tally(apply_invoice(db, record)?);
    }

    Ok(outcome)
}

fn apply_project(db: &Database, record: &Value) -> Result<bool, DashboardError> {
    let id = coerce_string(record.get("id"));
    let name = coerce_string(record.get("name"));
    if id.trim().is_empty() || name.trim().is_empty() {
        debug!("Skipping project without id or name");
        return Ok(false);
    }

    let status = record
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<ProjectStatus>().ok())
        .unwrap_or_default();
    let client = record
        .get("client")
        .and_then(Value::as_str)
        .filter(|c| !c.trim().is_empty());

    db.upsert_project(id.trim(), name.trim(), client, status)?;
    Ok(true)
}

fn apply_financial_row(db: &Database, record: &Value) -> Result<bool, DashboardError> {
    let row = FinancialRow::from_value(record);
    let project_id = row.project_id.as_str();
    let Some(month) = normalize_month(&coerce_string(record.get("month"))) else {
        debug!(project_id, "Skipping financial row without a valid month");
        return Ok(false);
    };
    if project_id.is_empty() {
        return Ok(false);
    }

    if db.get_project(project_id)?.is_none() {
        // Rows may introduce a project by name
        if row.project_name.is_empty() {
            debug!(project_id, "Skipping financial row for unknown project");
            return Ok(false);
        }
        db.upsert_project(project_id, &row.project_name, None, ProjectStatus::Active)?;
    }

    db.upsert_financials(project_id, &month, row.actual_revenue, row.actual_costs)?;
    Ok(true)
}

fn apply_invoice(db: &Database, record: &Value) -> Result<bool, DashboardError> {
    let id = coerce_string(record.get("id"));
    let project_id = coerce_string(record.get("project_id"));
    let due_date = coerce_string(record.get("due_date"));

    let due_date = match NaiveDate::parse_from_str(due_date.trim(), "%Y-%m-%d") {
        Ok(d) => d.format("%Y-%m-%d").to_string(),
        Err(_) => return Ok(false),
    };
    if id.trim().is_empty() || db.get_project(project_id.trim())?.is_none() {
        return Ok(false);
    }

    let status = record
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<InvoiceStatus>().ok())
        .unwrap_or_default();

    db.upsert_invoice(&Invoice {
        id: id.trim().to_string(),
        project_id: project_id.trim().to_string(),
        amount: coerce_number(record.get("amount")),
        status,
        due_date,
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportWindow;
    use serde_json::json;

    fn payload(value: Value) -> SyncPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sync_projects_rows_and_invoices() {
        let db = Database::in_memory().unwrap();
        let outcome = apply_sync(&db, &payload(json!({
            "projects": [{"id": "p1", "name": "Alpha", "client": "Northwind", "status": "active"}],
            "rows": [
                {"project_id": "p1", "month": "2024-01", "revenue": "1000", "costs": 600},
                {"project_id": "p1", "month": "2024-02-14", "revenue": 500, "costs": null},
            ],
            "invoices": [{"id": "inv-1", "project_id": "p1", "amount": "450.00", "status": "sent", "due_date": "2024-03-01"}],
        }))).unwrap();

        assert_eq!(outcome, SyncOutcome { accepted: 4, skipped: 0 });
        let rows = db.financial_rows(&ReportWindow::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].actual_revenue, 500.0);
        assert_eq!(rows[1].actual_costs, 0.0);

        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(db.invoice_counts(today).unwrap(), (1, 0));
    }

    #[test]
    fn test_sync_row_can_introduce_project() {
        let db = Database::in_memory().unwrap();
        let outcome = apply_sync(&db, &payload(json!({
            "rows": [{"project_id": "p9", "project_name": "Nine", "month": "2024-05", "actual_revenue": 10}],
        }))).unwrap();
        assert_eq!(outcome.accepted, 1);
        assert_eq!(db.get_project("p9").unwrap().unwrap().name, "Nine");
    }

    #[test]
    fn test_sync_skips_malformed_records() {
        let db = Database::in_memory().unwrap();
        let outcome = apply_sync(&db, &payload(json!({
            "projects": [{"id": "", "name": "No id"}, {"id": "p1", "name": "Alpha"}],
            "rows": [
                {"project_id": "p1", "month": "sometime"},
                {"project_id": "", "month": "2024-01"},
                {"project_id": "ghost", "month": "2024-01", "revenue": 5},
                "not a record",
            ],
            "invoices": [
                {"id": "inv-1", "project_id": "p1", "due_date": "soon"},
                {"id": "inv-2", "project_id": "ghost", "due_date": "2024-01-01"},
            ],
        }))).unwrap();
        assert_eq!(outcome, SyncOutcome { accepted: 1, skipped: 7 });
    }

    #[test]
    fn test_sync_empty_payload() {
        let db = Database::in_memory().unwrap();
        assert_eq!(apply_sync(&db, &SyncPayload::default()).unwrap(), SyncOutcome::default());
    }

    #[test]
    fn test_sync_unknown_status_defaults() {
        let db = Database::in_memory().unwrap();
        apply_sync(&db, &payload(json!({
            "projects": [{"id": "p1", "name": "Alpha", "status": "archived"}],
        }))).unwrap();
        assert_eq!(db.get_project("p1").unwrap().unwrap().status, ProjectStatus::Active);
    }
}
