use serde::{Deserialize, Serialize};

pub const DEFAULT_COMPANY_NAME: &str = "My Company";
pub const DEFAULT_DB_PATH: &str = "./data/pnl.db";
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DashboardConfig {
    pub company: Option<CompanyConfig>,
    pub server: Option<ServerConfig>,
    pub auth: Option<AuthConfig>,
    pub webhook: Option<WebhookConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CompanyConfig {
    pub name: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AuthConfig {
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WebhookConfig {
    pub url: Option<String>,
    /// Shared secret expected in `x-webhook-secret` on inbound syncs.
    pub secret: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl DashboardConfig {
    pub fn company_name(&self) -> &str {
        self.company
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_COMPANY_NAME)
    }

    pub fn api_token(&self) -> Option<&str> {
        self.auth
            .as_ref()
            .and_then(|a| a.api_token.as_deref())
            .filter(|t| !t.is_empty())
    }

    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook.as_ref().and_then(|w| w.url.as_deref())
    }

    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook
            .as_ref()
            .and_then(|w| w.secret.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn webhook_timeout_secs(&self) -> u64 {
        self.webhook
            .as_ref()
            .and_then(|w| w.timeout_secs)
            .unwrap_or(DEFAULT_WEBHOOK_TIMEOUT_SECS)
    }

    pub fn database_path(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.database.as_deref())
            .unwrap_or(DEFAULT_DB_PATH)
    }
}
