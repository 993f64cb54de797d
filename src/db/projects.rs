use chrono::Utc;
use crate::errors::DashboardError;
use crate::models::{Project, ProjectStatus};
use super::Database;

impl Database {
    /// Insert a project, or update name/client/status of an existing one.
    /// `created_at` and the table position of an existing project are kept.
    pub fn upsert_project(
        &self,
        id: &str,
        name: &str,
        client: Option<&str>,
        status: ProjectStatus,
    ) -> Result<(), DashboardError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO projects (id, name, client, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, client = excluded.client, status = excluded.status",
            rusqlite::params![id, name, client, status.as_str(), Utc::now().to_rfc3339()],
        ).map_err(|e| DashboardError::Database(format!("Failed to save project: {}", e)))?;
        Ok(())
    }

    pub fn get_project(&self, id: &str) -> Result<Option<Project>, DashboardError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, client, status, created_at FROM projects WHERE id = ?1"
        ).map_err(|e| DashboardError::Database(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![id], project_from_row) {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DashboardError::Database(format!("Query error: {}", e))),
        }
    }

    /// All projects in the order they were first created.
    pub fn list_projects(&self) -> Result<Vec<Project>, DashboardError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, client, status, created_at FROM projects ORDER BY rowid"
        ).map_err(|e| DashboardError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], project_from_row)
            .map_err(|e| DashboardError::Database(format!("Query error: {}", e)))?;

        let mut projects = Vec::new();
        for row in rows {
            projects.push(row.map_err(|e| DashboardError::Database(format!("Row error: {}", e)))?);
        }
        Ok(projects)
    }

    pub fn delete_project(&self, id: &str) -> Result<bool, DashboardError> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM projects WHERE id = ?1", rusqlite::params![id])
            .map_err(|e| DashboardError::Database(format!("Delete failed: {}", e)))?;
        Ok(affected > 0)
    }

    pub fn count_projects_with_status(&self, status: ProjectStatus) -> Result<u64, DashboardError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM projects WHERE status = ?1",
            rusqlite::params![status.as_str()],
            |row| row.get(0),
        ).map_err(|e| DashboardError::Database(format!("Query error: {}", e)))?;
        Ok(count.max(0) as u64)
    }
}

fn project_from_row(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    let status: String = row.get(3)?;
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        client: row.get(2)?,
        status: status.parse().unwrap_or_default(),
        created_at: row.get(4)?,
    })
}
