use crate::errors::DashboardError;
use super::Database;

/// Settings key holding the display name shown on dashboards and exports.
pub const COMPANY_NAME_KEY: &str = "company_name";

impl Database {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>, DashboardError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")
            .map_err(|e| DashboardError::Database(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![key], |row: &rusqlite::Row| row.get::<_, String>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DashboardError::Database(format!("Query error: {}", e))),
        }
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), DashboardError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, value],
        ).map_err(|e| DashboardError::Database(format!("Insert failed: {}", e)))?;
        Ok(())
    }

    pub fn get_all_settings(&self) -> Result<serde_json::Value, DashboardError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key")
            .map_err(|e| DashboardError::Database(format!("Query failed: {}", e)))?;

        let mut settings = serde_json::Map::new();
        let rows = stmt.query_map([], |row: &rusqlite::Row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        }).map_err(|e| DashboardError::Database(format!("Query error: {}", e)))?;

        for row in rows {
            let (key, value): (String, String) = row.map_err(|e| DashboardError::Database(format!("Row error: {}", e)))?;
            settings.insert(key, serde_json::Value::String(value));
        }

        Ok(serde_json::Value::Object(settings))
    }

    /// Stored company name, falling back to `default` when unset or blank.
    pub fn company_name(&self, default: &str) -> Result<String, DashboardError> {
        Ok(self
            .get_setting(COMPANY_NAME_KEY)?
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| default.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_set_and_get_setting() {
        let db = Database::in_memory().unwrap();
        db.set_setting("currency", "GBP").unwrap();
        assert_eq!(db.get_setting("currency").unwrap(), Some("GBP".to_string()));
    }

    #[test]
    fn test_db_get_nonexistent_setting() {
        let db = Database::in_memory().unwrap();
        assert!(db.get_setting("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_db_set_setting_upsert() {
        let db = Database::in_memory().unwrap();
        db.set_setting(COMPANY_NAME_KEY, "Acme").unwrap();
        db.set_setting(COMPANY_NAME_KEY, "Acme Ltd").unwrap();
        assert_eq!(db.get_setting(COMPANY_NAME_KEY).unwrap(), Some("Acme Ltd".to_string()));
    }

    #[test]
    fn test_db_get_all_settings() {
        let db = Database::in_memory().unwrap();
        db.set_setting(COMPANY_NAME_KEY, "Acme Ltd").unwrap();
        db.set_setting("currency", "GBP").unwrap();

        let all = db.get_all_settings().unwrap();
        let obj = all.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["company_name"], "Acme Ltd");
        assert_eq!(obj["currency"], "GBP");
    }

    #[test]
    fn test_db_company_name_fallback() {
        let db = Database::in_memory().unwrap();
        assert_eq!(db.company_name("Default Co").unwrap(), "Default Co");

        db.set_setting(COMPANY_NAME_KEY, "  ").unwrap();
        assert_eq!(db.company_name("Default Co").unwrap(), "Default Co");

        db.set_setting(COMPANY_NAME_KEY, "Acme Ltd").unwrap();
        assert_eq!(db.company_name("Default Co").unwrap(), "Acme Ltd");
    }
}
