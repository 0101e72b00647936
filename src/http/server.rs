//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router mounting the forwarder under `/api`
//! - Wire up middleware (request ID, tracing, body size limit)
//! - Bind server to listener with graceful shutdown

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::config::ForwarderConfig;
use crate::error::ForwardError;
use crate::forward::{Forwarder, InboundRequest, ProxyResult, ReqwestUpstream, Upstream, MOUNT_PREFIX};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Forwarder,
}

/// HTTP server hosting the forwarder.
pub struct HttpServer {
    router: Router,
    config: ForwarderConfig,
}

impl HttpServer {
    /// Create a server that forwards through a reqwest client.
    pub fn new(config: ForwarderConfig) -> Result<Self, ForwardError> {
        let upstream = ReqwestUpstream::new(config.upstream.timeout())?;
        Ok(Self::with_upstream(config, Arc::new(upstream)))
    }

    /// Create a server around an arbitrary upstream client.
    pub fn with_upstream(config: ForwarderConfig, upstream: Arc<dyn Upstream>) -> Self {
        let forwarder = Forwarder::new(config.upstream.base_url.clone(), upstream);
        let router = Self::build_router(AppState { forwarder }, config.limits.max_body_size);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// `/api`, `/api/` and everything below accept any method. Request bodies
    /// larger than `max_body_size` are answered with 413 before the forwarder
    /// runs.
    fn build_router(state: AppState, max_body_size: usize) -> Router {
        let nested = format!("{MOUNT_PREFIX}/{{*rest}}");
        let slash = format!("{MOUNT_PREFIX}/");

        Router::new()
            .route(MOUNT_PREFIX, any(forward_handler))
            .route(&slash, any(forward_handler))
            .route(&nested, any(forward_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(RequestBodyLimitLayer::new(max_body_size)),
            )
    }

    /// The router, for serving or driving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C or the shutdown channel fires.
    pub async fn run(self, listener: TcpListener, shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Forward everything under the mount prefix.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> ProxyResult {
    let span = tracing::info_span!("forward", request_id = %request_id(request.headers()));
    let inbound = InboundRequest::from_request(request);
    state.forwarder.forward(inbound).instrument(span).await
}

async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutdown signal received"),
        _ = shutdown.recv() => tracing::info!("Shutdown requested"),
    }
}
