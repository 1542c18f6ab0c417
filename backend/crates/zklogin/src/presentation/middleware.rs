//! Session Auth Guard
//!
//! Resolves the session token header into a [`ResolvedIdentity`] stored in
//! request extensions. Required mode rejects the request; optional mode
//! lets it through without an identity.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use platform::header::extract_bearer_token;

use crate::application::identity_session::{IdentitySessionService, ResolvedIdentity};
use crate::domain::repository::{AddressRepository, SessionRepository};
use crate::error::{AuthFailure, ZkLoginResult};

pub struct SessionAuthGuard<A, S>
where
    A: AddressRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    service: Arc<IdentitySessionService<A, S>>,
}

impl<A, S> Clone for SessionAuthGuard<A, S>
where
    A: AddressRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<A, S> SessionAuthGuard<A, S>
where
    A: AddressRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    pub fn new(service: Arc<IdentitySessionService<A, S>>) -> Self {
        Self { service }
    }

    /// Validate the token header; a missing header is `NoToken`.
    /// A `Bearer ` prefix on the value is tolerated.
    pub async fn authorize(&self, headers: &HeaderMap) -> ZkLoginResult<ResolvedIdentity> {
        let token = extract_bearer_token(headers, &self.service.config().token_header)
            .ok_or(AuthFailure::NoToken)?;
        self.service.validate(&token).await
    }

    /// Like [`authorize`](Self::authorize) but never fails
    pub async fn authorize_optional(&self, headers: &HeaderMap) -> Option<ResolvedIdentity> {
        match self.authorize(headers).await {
            Ok(identity) => Some(identity),
            Err(e) => {
                match e.auth_failure() {
                    Some(AuthFailure::NoToken) => {}
                    Some(reason) => tracing::debug!(%reason, "Ignoring invalid Sui token"),
                    None => tracing::warn!(error = %e, "Sui token check failed"),
                }
                None
            }
        }
    }
}

/// Middleware that requires a valid session token
pub async fn require_sui_token<A, S>(
    State(guard): State<SessionAuthGuard<A, S>>,
    mut req: Request,
    next: Next,
) -> ZkLoginResult<Response>
where
    A: AddressRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let identity = guard.authorize(req.headers()).await?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Middleware that attaches an identity when the token is valid
pub async fn check_sui_token<A, S>(
    State(guard): State<SessionAuthGuard<A, S>>,
    mut req: Request,
    next: Next,
) -> Response
where
    A: AddressRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    if let Some(identity) = guard.authorize_optional(req.headers()).await {
        req.extensions_mut().insert(identity);
    }
    next.run(req).await
}
