use chrono::Datelike;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// The four deployed services the harness talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Admin,
    Costs,
    Logs,
    Users,
}

impl ServiceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Admin => "admin",
            ServiceKind::Costs => "costs",
            ServiceKind::Logs => "logs",
            ServiceKind::Users => "users",
        }
    }
}

/// Everything a test run needs to know about the deployment under test.
///
/// Built once at process start and never mutated; scenarios receive it by
/// reference through [`config`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub admin_url: String,
    pub costs_url: String,
    pub logs_url: String,
    pub users_url: String,
    pub test_user_id: String,
    pub test_year: i32,
    pub test_month: u32,
    pub ready_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl HarnessConfig {
    pub fn from_env() -> Self {
        Self::defaults().with_env_overrides()
    }

    fn defaults() -> Self {
        let today = chrono::Local::now();
        Self {
            admin_url: "http://localhost:3001".to_string(),
            costs_url: "http://localhost:3002".to_string(),
            logs_url: "http://localhost:3003".to_string(),
            users_url: "http://localhost:3004".to_string(),
            test_user_id: "123123".to_string(),
            test_year: today.year(),
            test_month: today.month(),
            ready_timeout_secs: 30,
            request_timeout_secs: 10,
        }
    }

    fn with_env_overrides(mut self) -> Self {
        // Service URL overrides
        if let Ok(v) = env::var("ADMIN_URL") {
            self.admin_url = normalized_url(&v).unwrap_or(self.admin_url);
        }
        if let Ok(v) = env::var("COSTS_URL") {
            self.costs_url = normalized_url(&v).unwrap_or(self.costs_url);
        }
        if let Ok(v) = env::var("LOGS_URL") {
            self.logs_url = normalized_url(&v).unwrap_or(self.logs_url);
        }
        if let Ok(v) = env::var("USERS_URL") {
            self.users_url = normalized_url(&v).unwrap_or(self.users_url);
        }

        // Test fixture overrides
        if let Ok(v) = env::var("TEST_USER_ID") {
            let v = v.trim();
            if !v.is_empty() {
                self.test_user_id = v.to_string();
            }
        }
        if let Ok(v) = env::var("TEST_YEAR") {
            self.test_year = v.parse().unwrap_or(self.test_year);
        }
        if let Ok(v) = env::var("TEST_MONTH") {
            self.test_month = v.parse().unwrap_or(self.test_month);
        }

        // Timing overrides
        if let Ok(v) = env::var("READY_TIMEOUT_SECS") {
            self.ready_timeout_secs = v.parse().unwrap_or(self.ready_timeout_secs);
        }
        if let Ok(v) = env::var("REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = v.parse().unwrap_or(self.request_timeout_secs);
        }

        self
    }

    pub fn base_url(&self, service: ServiceKind) -> &str {
        match service {
            ServiceKind::Admin => &self.admin_url,
            ServiceKind::Costs => &self.costs_url,
            ServiceKind::Logs => &self.logs_url,
            ServiceKind::Users => &self.users_url,
        }
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Trim whitespace and any trailing slash so path concatenation stays
/// uniform; reject values that do not parse as an absolute URL.
fn normalized_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    match url::Url::parse(trimmed) {
        Ok(_) => Some(trimmed.to_string()),
        Err(err) => {
            tracing::warn!(raw, %err, "ignoring malformed service URL override");
            None
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<HarnessConfig> = Lazy::new(|| {
    // Load .env if present so local runs pick up service URLs without exporting
    let _ = dotenvy::dotenv();
    HarnessConfig::from_env()
});

// Convenience function for accessing config
pub fn config() -> &'static HarnessConfig {
    &CONFIG
}
