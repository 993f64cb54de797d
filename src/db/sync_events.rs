use chrono::Utc;
use serde::Serialize;
use crate::errors::DashboardError;
use super::Database;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncEvent {
    pub id: String,
    pub source: String,
    pub accepted: u64,
    pub skipped: u64,
    pub received_at: String,
}

impl Database {
    pub fn record_sync_event(&self, source: &str, accepted: u64, skipped: u64) -> Result<String, DashboardError> {
        let conn = self.lock()?;
        let id = uuid::Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO sync_events (id, source, accepted, skipped, received_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![id, source, accepted as i64, skipped as i64, Utc::now().to_rfc3339()],
        ).map_err(|e| DashboardError::Database(format!("Failed to record sync event: {}", e)))?;
        Ok(id)
    }

    /// Most recent sync events first.
    pub fn recent_sync_events(&self, limit: usize) -> Result<Vec<SyncEvent>, DashboardError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, source, accepted, skipped, received_at FROM sync_events ORDER BY rowid DESC LIMIT ?1"
        ).map_err(|e| DashboardError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![limit as i64], |row: &rusqlite::Row| {
            Ok(SyncEvent {
                id: row.get(0)?,
                source: row.get(1)?,
                accepted: row.get::<_, i64>(2)?.max(0) as u64,
                skipped: row.get::<_, i64>(3)?.max(0) as u64,
                received_at: row.get(4)?,
            })
        }).map_err(|e| DashboardError::Database(format!("Query error: {}", e)))?;

        let mut events = Vec::new();
        for row in rows {
            events.push(row.map_err(|e| DashboardError::Database(format!("Row error: {}", e)))?);
        }
        Ok(events)
    }
}
