//! Server host for transport-agnostic API exposure
//!
//! The host holds the application state every exposure needs: the hotel
//! service, the auth provider and the error mapping.

use crate::core::auth::{AuthProvider, AuthState};
use crate::core::error::ErrorMapping;
use crate::core::repository::HotelStore;
use crate::hotels::handlers::AppState;
use crate::hotels::service::HotelService;
use std::sync::Arc;

/// Host context containing all service state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::from_builder_components(store, provider, ErrorMapping::Strict);
/// let rest_app = RestExposure::build_router(Arc::new(host), vec![])?;
/// ```
pub struct ServerHost {
    /// Hotel operations behind the eligibility gate
    pub service: HotelService,

    /// Resolves request credentials
    pub auth_provider: Arc<dyn AuthProvider>,

    /// How failures are rendered at the boundary
    pub error_mapping: ErrorMapping,
}

impl ServerHost {
    /// Build the host from builder components
    pub fn from_builder_components(
        store: Arc<dyn HotelStore>,
        auth_provider: Arc<dyn AuthProvider>,
        error_mapping: ErrorMapping,
    ) -> Self {
        Self {
            service: HotelService::new(store),
            auth_provider,
            error_mapping,
        }
    }

    /// Handler state derived from the host
    pub fn app_state(&self) -> AppState {
        AppState {
            service: self.service.clone(),
            auth: AuthState {
                provider: self.auth_provider.clone(),
                error_mapping: self.error_mapping,
            },
        }
    }
}
