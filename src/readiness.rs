//! Wait for a deployed service to come up before running scenarios
//! against it. Cold-started deployments can take tens of seconds to answer
//! their first request; polling here keeps that retry logic out of every
//! test.

use std::time::{Duration, Instant};

use crate::client::ServiceClient;
use crate::error::HarnessError;

pub const DEFAULT_HEALTH_PATH: &str = "/health";

const RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Poll the service's `/health` endpoint until it answers with any sub-500
/// status or `timeout` elapses.
pub async fn wait_for_service(
    client: &ServiceClient,
    timeout: Duration,
) -> Result<(), HarnessError> {
    wait_for_path(client, DEFAULT_HEALTH_PATH, timeout).await
}

/// Same as [`wait_for_service`] with an explicit health path.
///
/// Transport errors during a single attempt are swallowed and remembered as
/// the last error; only timeout exhaustion fails the call.
pub async fn wait_for_path(
    client: &ServiceClient,
    health_path: &str,
    timeout: Duration,
) -> Result<(), HarnessError> {
    let start = Instant::now();
    let mut last_error: Option<String> = None;

    while start.elapsed() < timeout {
        match client.get(health_path).await {
            Ok(res) if res.status.as_u16() < 500 => return Ok(()),
            Ok(res) => {
                // Server-side failure: keep waiting
                tracing::debug!(url = %res.url, status = %res.status, "service answered with a server error");
            }
            Err(err) => {
                last_error = Some(err.to_string());
            }
        }
        tokio::time::sleep(RETRY_INTERVAL).await;
    }

    Err(HarnessError::ServiceUnavailable {
        url: format!("{}{}", client.base_url(), health_path),
        waited_secs: timeout.as_secs(),
        last_error: last_error.unwrap_or_else(|| "none".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub server");
        });
        format!("http://{}", addr)
    }

    fn stub_client(base: String) -> ServiceClient {
        ServiceClient::new(base, Duration::from_millis(500))
    }

    #[tokio::test]
    async fn any_sub_500_status_counts_as_ready() {
        // No /health route at all: the stub answers 404, which still proves
        // the service is up and handling requests.
        let base = spawn_stub(Router::new()).await;

        wait_for_service(&stub_client(base), Duration::from_secs(5))
            .await
            .expect("404 should count as ready");
    }

    #[tokio::test]
    async fn recovers_once_server_errors_stop() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/health",
            get(move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        StatusCode::INTERNAL_SERVER_ERROR
                    } else {
                        StatusCode::OK
                    }
                }
            }),
        );
        let base = spawn_stub(app).await;

        wait_for_service(&stub_client(base), Duration::from_secs(10))
            .await
            .expect("service should become ready after transient 500s");
        assert!(hits.load(Ordering::SeqCst) >= 3, "expected at least three polls");
    }

    #[tokio::test]
    async fn dead_port_exhausts_into_service_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let client = stub_client(format!("http://{}", addr));
        let err = wait_for_service(&client, Duration::from_secs(2))
            .await
            .expect_err("nothing listens on the port");

        match err {
            HarnessError::ServiceUnavailable { url, last_error, .. } => {
                assert!(url.ends_with("/health"), "unexpected url: {url}");
                assert_ne!(last_error, "none", "last transport error should be recorded");
            }
            other => panic!("expected ServiceUnavailable, got: {other}"),
        }
    }

    #[tokio::test]
    async fn persistent_server_errors_exhaust_without_transport_error() {
        let app = Router::new().route(
            "/health",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = spawn_stub(app).await;

        let err = wait_for_service(&stub_client(base), Duration::from_secs(2))
            .await
            .expect_err("a 500 is never ready");

        match err {
            HarnessError::ServiceUnavailable { last_error, .. } => {
                assert_eq!(last_error, "none");
            }
            other => panic!("expected ServiceUnavailable, got: {other}"),
        }
    }
}
