use std::path::Path;
use crate::errors::DashboardError;
use super::types::DashboardConfig;
use super::security::validate_security_patterns;
use super::schema::CONFIG_SCHEMA;
use tracing::{debug, warn};

pub const API_TOKEN_ENV: &str = "PNL_API_TOKEN";
pub const WEBHOOK_URL_ENV: &str = "PNL_WEBHOOK_URL";
pub const WEBHOOK_SECRET_ENV: &str = "PNL_WEBHOOK_SECRET";

pub async fn parse_config(path: &Path) -> Result<DashboardConfig, DashboardError> {
    if !path.exists() {
        return Err(DashboardError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(DashboardError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<DashboardConfig, DashboardError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // An empty file parses as null
    if yaml.is_null() {
        return Ok(DashboardConfig::default());
    }

    validate_security_patterns(&yaml)?;
    validate_schema(&yaml)?;

    let config: DashboardConfig = serde_yaml::from_value(yaml)?;
    validate_semantics(&config)?;

    Ok(config)
}

/// Load the config file when one is given, then layer environment overrides on top.
pub async fn load_config(path: Option<&Path>) -> Result<DashboardConfig, DashboardError> {
    let mut config = match path {
        Some(path) => parse_config(path).await?,
        None => DashboardConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_semantics(&config)?;
    Ok(config)
}

pub fn apply_env_overrides<F>(config: &mut DashboardConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup(API_TOKEN_ENV).filter(|v| !v.is_empty()) {
        debug!(var = API_TOKEN_ENV, "API token taken from environment");
        config.auth.get_or_insert_with(Default::default).api_token = Some(token);
    }
    if let Some(url) = lookup(WEBHOOK_URL_ENV).filter(|v| !v.is_empty()) {
        config.webhook.get_or_insert_with(Default::default).url = Some(url);
    }
    if let Some(secret) = lookup(WEBHOOK_SECRET_ENV).filter(|v| !v.is_empty()) {
        config.webhook.get_or_insert_with(Default::default).secret = Some(secret);
    }
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), DashboardError> {
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| DashboardError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| DashboardError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        // Advisory only: typed deserialization decides what is fatal
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

fn validate_semantics(config: &DashboardConfig) -> Result<(), DashboardError> {
    if let Some(url) = config.webhook_url() {
        let lower = url.trim().to_ascii_lowercase();
        if !lower.is_empty() && !lower.starts_with("http://") && !lower.starts_with("https://") {
            return Err(DashboardError::Config(format!(
                "Webhook URL must use http or https: {}", url
            )));
        }
    }

    if let Some(server) = &config.server {
        if server.port == Some(0) {
            return Err(DashboardError::Config("Server port must be non-zero".into()));
        }
    }

    if config.webhook.as_ref().and_then(|w| w.timeout_secs) == Some(0) {
        return Err(DashboardError::Config("Webhook timeout must be at least 1 second".into()));
    }

    if config.webhook_url().is_some() && config.webhook_secret().is_none() {
        warn!("Webhook configured without a shared secret; inbound syncs are unauthenticated");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config_str(
            "company:\n  name: Acme Ltd\nserver:\n  port: 9000\nwebhook:\n  url: https://hooks.example.com/pnl\n  secret: s3cret\n"
        ).unwrap();
        assert_eq!(config.company_name(), "Acme Ltd");
        assert_eq!(config.webhook_secret(), Some("s3cret"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("").unwrap();
        assert!(config.company.is_none());
    }

    #[test]
    fn test_non_http_webhook_rejected() {
        let err = parse_config_str("webhook:\n  url: ftp://hooks.example.com\n").unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[test]
    fn test_zero_port_rejected() {
        assert!(parse_config_str("server:\n  port: 0\n").is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(parse_config_str("webhook:\n  timeout_secs: 0\n").is_err());
    }

    #[test]
    fn test_wrong_type_is_yaml_error() {
        let err = parse_config_str("server:\n  port: eighty\n").unwrap_err();
        assert!(matches!(err, DashboardError::Yaml(_)));
    }

    #[test]
    fn test_parent_directory_database_accepted() {
        let config = parse_config_str("server:\n  database: ../shared/pnl.db\n").unwrap();
        assert_eq!(config.database_path(), "../shared/pnl.db");
    }

    #[test]
    fn test_secret_with_scheme_like_text_accepted() {
        let config = parse_config_str("webhook:\n  secret: 'xfile:9'\n").unwrap();
        assert_eq!(config.webhook_secret(), Some("xfile:9"));
    }

    #[test]
    fn test_dangerous_webhook_scheme_rejected() {
        assert!(parse_config_str("webhook:\n  url: 'javascript:alert(1)'\n").is_err());
    }

    #[test]
    fn test_env_overrides_applied() {
        let env: HashMap<&str, &str> = HashMap::from([
            (API_TOKEN_ENV, "env-token"),
            (WEBHOOK_SECRET_ENV, "env-secret"),
            (WEBHOOK_URL_ENV, ""),
        ]);
        let mut config = parse_config_str("auth:\n  api_token: file-token\n").unwrap();
        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_token(), Some("env-token"));
        assert_eq!(config.webhook_secret(), Some("env-secret"));
        assert!(config.webhook_url().is_none());
    }

    #[tokio::test]
    async fn test_parse_config_missing_file() {
        let err = parse_config(Path::new("/nonexistent/pnl-dashboard.yaml")).await.unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[tokio::test]
    async fn test_parse_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pnl-dashboard.yaml");
        tokio::fs::write(&path, "company:\n  name: File Co\n").await.unwrap();
        let config = parse_config(&path).await.unwrap();
        assert_eq!(config.company_name(), "File Co");
    }
}
