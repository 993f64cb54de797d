use crate::errors::DashboardError;

/// Config values sent out as URLs.
const URL_PATHS: &[&str] = &["webhook.url"];

/// Config values rendered into reports and logs.
const TEXT_PATHS: &[&str] = &["company.name", "company.currency", "server.host"];

const DANGEROUS_SCHEMES: &[&str] = &["javascript:", "file:", "vbscript:", "data:"];

const MARKUP_PATTERNS: &[&str] = &["<script", "javascript:"];

/// Scan URL and display values for injected schemes or markup. Paths, tokens
/// and secrets are opaque and never scanned.
pub fn validate_security_patterns(value: &serde_yaml::Value) -> Result<(), DashboardError> {
    check_value(value, &[])
}

fn check_value(value: &serde_yaml::Value, path: &[String]) -> Result<(), DashboardError> {
    match value {
        serde_yaml::Value::String(s) => {
            let path_str = path.join(".");
            let patterns = if URL_PATHS.contains(&path_str.as_str()) {
                DANGEROUS_SCHEMES
            } else if TEXT_PATHS.contains(&path_str.as_str()) {
                MARKUP_PATTERNS
            } else {
                return Ok(());
            };

            let lower = s.trim().to_lowercase();
            for pattern in patterns {
                if lower.contains(pattern) {
                    return Err(DashboardError::Config(
                        format!("Dangerous pattern '{}' found at config path: {}", pattern, path_str)
                    ));
                }
            }
            Ok(())
        }
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key = k.as_str().unwrap_or("unknown").to_string();
                let mut new_path = path.to_vec();
                new_path.push(key);
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
