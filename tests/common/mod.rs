use std::sync::Once;

use anyhow::Result;

use cost_manager_e2e::client::ServiceClient;
use cost_manager_e2e::config::{config, ServiceKind};
use cost_manager_e2e::readiness::wait_for_service;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Build a client for one service and block until its health check answers,
/// so cold-started deployments don't fail the first scenario.
pub async fn ready_client(service: ServiceKind) -> Result<ServiceClient> {
    init_tracing();
    let cfg = config();
    let client = ServiceClient::for_service(cfg, service);
    tracing::debug!(
        service = service.name(),
        base_url = client.base_url(),
        "waiting for readiness"
    );
    wait_for_service(&client, cfg.ready_timeout()).await?;
    Ok(client)
}
