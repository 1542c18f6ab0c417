//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use std::sync::Arc;

use crate::application::identity_session::{IdentitySessionService, LoginInput};
use crate::domain::repository::{AddressRepository, SessionRepository};
use crate::domain::value_object::sui_address::SuiAddress;
use crate::error::{ZkLoginError, ZkLoginResult};
use crate::presentation::dto::{
    ConfigResponse, InitializeDirectRequest, InitializeDirectResponse, RefreshRequest,
    RefreshResponse, SessionStatusResponse, ZkLoginConfigDto, ZkLoginRequest, ZkLoginResponse,
};
use crate::presentation::middleware::SessionAuthGuard;

/// Shared state for zkLogin handlers
pub struct ZkLoginAppState<A, S>
where
    A: AddressRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    pub service: Arc<IdentitySessionService<A, S>>,
}

impl<A, S> Clone for ZkLoginAppState<A, S>
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

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/sui/zklogin
pub async fn zk_login<A, S>(
    State(state): State<ZkLoginAppState<A, S>>,
    Json(req): Json<ZkLoginRequest>,
) -> ZkLoginResult<Json<ZkLoginResponse>>
where
    A: AddressRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let id_token = non_blank(req.id_token)
        .ok_or_else(|| ZkLoginError::InvalidRequest("ID token cannot be empty".to_string()))?;

    // Identity providers without an email claim get a synthetic one
    let email = non_blank(req.email).or_else(|| {
        non_blank(req.google_user_id)
            .map(|id| format!("google-{id}@{}", state.service.config().anonymous_email_domain))
    });

    let issued = state
        .service
        .login(LoginInput {
            email,
            id_token: Some(id_token),
            nonce: non_blank(req.nonce),
        })
        .await?;

    Ok(Json(ZkLoginResponse::from(&issued)))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/sui/zklogin/refresh
pub async fn refresh<A, S>(
    State(state): State<ZkLoginAppState<A, S>>,
    Json(req): Json<RefreshRequest>,
) -> ZkLoginResult<Json<RefreshResponse>>
where
    A: AddressRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let raw = non_blank(req.sui_address)
        .ok_or_else(|| ZkLoginError::InvalidRequest("Sui address is required".to_string()))?;
    // An unparsable address cannot be registered
    let address = SuiAddress::parse(&raw).ok_or(ZkLoginError::AddressNotFound)?;

    let issued = state
        .service
        .refresh(&address, non_blank(req.id_token), req.nonce.as_deref())
        .await?;

    Ok(Json(RefreshResponse::from(&issued)))
}

// ============================================================================
// Config
// ============================================================================

/// GET /api/sui/zklogin/config
pub async fn config<A, S>(State(state): State<ZkLoginAppState<A, S>>) -> Json<ConfigResponse>
where
    A: AddressRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let config = state.service.config();
    Json(ConfigResponse {
        success: true,
        config: ZkLoginConfigDto {
            max_epoch: config.max_epoch.clone(),
            jwt_issuer: config.jwt_issuer.clone(),
            network_env: config.network_env.clone(),
        },
    })
}

// ============================================================================
// Direct Initialization
// ============================================================================

/// POST /api/sui/zklogin/initialize-direct
pub async fn initialize_direct<A, S>(
    State(state): State<ZkLoginAppState<A, S>>,
    Json(req): Json<InitializeDirectRequest>,
) -> ZkLoginResult<Json<InitializeDirectResponse>>
where
    A: AddressRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let email =
        non_blank(req.email).unwrap_or_else(|| state.service.config().anonymous_email());

    let issued = state
        .service
        .initialize_direct(Some(&email), req.nonce.as_deref())
        .await?;

    Ok(Json(InitializeDirectResponse::from(&issued)))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/sui/zklogin/session
pub async fn session_status<A, S>(
    State(state): State<ZkLoginAppState<A, S>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse>
where
    A: AddressRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let guard = SessionAuthGuard::new(Arc::clone(&state.service));

    let response = match guard.authorize_optional(&headers).await {
        Some(identity) => SessionStatusResponse {
            authenticated: true,
            address: Some(identity.address.to_string()),
            email: identity.email.map(|e| e.to_string()),
            expires_at_ms: Some(identity.expires_at.timestamp_millis()),
        },
        None => SessionStatusResponse {
            authenticated: false,
            address: None,
            email: None,
            expires_at_ms: None,
        },
    };

    Json(response)
}
