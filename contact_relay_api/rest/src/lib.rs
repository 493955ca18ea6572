use std::net::SocketAddr;

use axum::Router;
use contact_relay_core_contact_contracts::ContactService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Contact> {
    config: RestServerConfig,
    contact: Contact,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactService,
{
    pub fn new(config: RestServerConfig, contact: Contact) -> Self {
        Self { config, contact }
    }

    /// Serve the api until the process receives ctrl-c.
    pub async fn serve(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.config.addr).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new().merge(routes::contact::router(self.contact.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        router.layer(CorsLayer::permissive())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
