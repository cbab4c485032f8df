//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::core::auth::{AuthProvider, SessionAuthProvider};
use crate::core::error::ErrorMapping;
use crate::core::repository::{HotelStore, SessionRepository};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

/// Builder for creating the hotel listing HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(Arc::new(InMemoryStore::new()))
///     .with_error_mapping(ErrorMapping::Legacy)
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn HotelStore>>,
    sessions: Option<Arc<dyn SessionRepository>>,
    auth_provider: Option<Arc<dyn AuthProvider>>,
    error_mapping: ErrorMapping,
    cors: bool,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    ///
    /// CORS starts enabled, matching the `server.cors` default.
    pub fn new() -> Self {
        Self {
            store: None,
            sessions: None,
            auth_provider: None,
            error_mapping: ErrorMapping::default(),
            cors: true,
            custom_routes: Vec::new(),
        }
    }

    /// Set the backing store (required)
    ///
    /// Unless another provider is set, bearer tokens are resolved against
    /// this store's sessions.
    pub fn with_store<S>(mut self, store: Arc<S>) -> Self
    where
        S: HotelStore + 'static,
    {
        self.sessions = Some(store.clone());
        self.store = Some(store);
        self
    }

    /// Replace session-based authentication
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth_provider = Some(Arc::new(provider));
        self
    }

    pub fn with_error_mapping(mut self, mapping: ErrorMapping) -> Self {
        self.error_mapping = mapping;
        self
    }

    /// Allow cross-origin requests from any origin
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    /// Add custom routes to the server
    ///
    /// Custom routes are not behind authentication unless their handlers ask
    /// for an `AuthenticatedUser`.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("A store is required. Call .with_store()"))?;

        let auth_provider = match self.auth_provider.take() {
            Some(provider) => provider,
            None => {
                let sessions = self
                    .sessions
                    .take()
                    .ok_or_else(|| anyhow::anyhow!("No session repository for authentication"))?;
                Arc::new(SessionAuthProvider::new(sessions))
            }
        };

        Ok(ServerHost::from_builder_components(
            store,
            auth_provider,
            self.error_mapping,
        ))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        let app = RestExposure::build_router(host, custom_routes)?;

        if self.cors {
            Ok(app.layer(CorsLayer::permissive()))
        } else {
            Ok(app)
        }
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr`, serves requests and stops on SIGTERM or Ctrl+C.
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_store(store)
    ///     .serve("127.0.0.1:4000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
