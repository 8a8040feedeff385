use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

use crate::config::{HarnessConfig, ServiceKind};
use crate::error::HarnessError;

/// One HTTP exchange with a service under test.
///
/// The body is parsed eagerly: anything that is not valid JSON (including an
/// empty body) is represented as `None` rather than an error, since several
/// endpoints legitimately answer without a JSON payload.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub json: Option<Value>,
    pub url: String,
}

/// Thin wrapper over [`reqwest::Client`] bound to one service's base URL,
/// applying the configured per-request timeout to every call.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl ServiceClient {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            request_timeout,
        }
    }

    pub fn for_service(config: &HarnessConfig, service: ServiceKind) -> Self {
        Self::new(config.base_url(service), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, HarnessError> {
        self.execute(self.http.get(self.url(path))).await
    }

    pub async fn get_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, HarnessError> {
        self.execute(self.http.get(self.url(path)).query(query)).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<ApiResponse, HarnessError> {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<ApiResponse, HarnessError> {
        let request = builder
            .timeout(self.request_timeout)
            .build()
            .map_err(|source| HarnessError::Transport {
                url: self.base_url.clone(),
                source,
            })?;
        let method = request.method().clone();
        let url = request.url().to_string();

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|source| HarnessError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let json = response.json::<Value>().await.ok();
        tracing::debug!(%method, %url, %status, "request completed");

        Ok(ApiResponse { status, json, url })
    }
}
