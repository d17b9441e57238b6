pub mod handlers;
pub mod models;
pub mod router;

use crate::config::Config;
use crate::service::FundingService;
use std::net::SocketAddr;
use std::sync::Arc;

pub struct ApiServer {
    service: Arc<FundingService>,
}

impl ApiServer {
    pub fn new(service: Arc<FundingService>) -> Self {
        Self { service }
    }

    /// Binds the server to the configured port and serves until ctrl-c.
    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        let app = router::build(Arc::clone(&self.service));
        let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));

        tracing::info!("API server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        Ok(())
    }
}
