//! Bearer-session authentication
//!
//! Requests carry `Authorization: Bearer <token>`. The token is looked up in
//! the session table; a match yields the user the request acts for. Anything
//! else is rejected with 401 before handler code runs.

use crate::core::entity::Id;
use crate::core::error::{ErrorMapping, HotelError, HotelResult};
use crate::core::repository::SessionRepository;
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::response::Response;
use std::sync::Arc;

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Authenticated user with a live session
    User { user_id: Id, session_id: Id },

    /// No credential presented
    Anonymous,
}

impl AuthContext {
    /// Get user_id if available
    pub fn user_id(&self) -> Option<Id> {
        match self {
            AuthContext::User { user_id, .. } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve request headers into an auth context
    ///
    /// A request without credentials is `Anonymous`; a credential that does
    /// not check out is an `Unauthorized` error.
    async fn extract_context(&self, headers: &HeaderMap) -> HotelResult<AuthContext>;
}

/// Provider resolving bearer tokens through stored sessions
pub struct SessionAuthProvider {
    sessions: Arc<dyn SessionRepository>,
}

impl SessionAuthProvider {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl AuthProvider for SessionAuthProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> HotelResult<AuthContext> {
        let Some(token) = bearer_token(headers)? else {
            return Ok(AuthContext::Anonymous);
        };

        let session = self
            .sessions
            .find_by_token(token)
            .await?
            .ok_or_else(|| HotelError::unauthorized("no session for token"))?;

        Ok(AuthContext::User {
            user_id: session.user_id,
            session_id: session.id,
        })
    }
}

/// Extract the bearer token, if an `Authorization` header is present
fn bearer_token(headers: &HeaderMap) -> HotelResult<Option<&str>> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| HotelError::unauthorized("authorization header is not valid text"))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| HotelError::unauthorized("expected 'Bearer <token>'"))?
        .trim();

    if token.is_empty() {
        return Err(HotelError::unauthorized("empty bearer token"));
    }

    Ok(Some(token))
}

/// State the [`AuthenticatedUser`] extractor needs
#[derive(Clone)]
pub struct AuthState {
    pub provider: Arc<dyn AuthProvider>,
    pub error_mapping: ErrorMapping,
}

/// An authenticated user, required by every hotel route
///
/// Rejects with 401 when the request is anonymous or the credential fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Id,
    pub session_id: Id,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthState::from_ref(state);

        let context = auth
            .provider
            .extract_context(&parts.headers)
            .await
            .map_err(|e| e.into_response_with(auth.error_mapping))?;

        match context {
            AuthContext::User {
                user_id,
                session_id,
            } => Ok(Self {
                user_id,
                session_id,
            }),
            AuthContext::Anonymous => Err(HotelError::unauthorized("missing bearer token")
                .into_response_with(auth.error_mapping)),
        }
    }
}
