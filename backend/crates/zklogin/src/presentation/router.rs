//! zkLogin Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::identity_session::IdentitySessionService;
use crate::domain::repository::{AddressRepository, SessionRepository};
use crate::presentation::handlers::{self, ZkLoginAppState};

/// Create the zkLogin router for any repository implementation
pub fn zklogin_router<A, S>(service: Arc<IdentitySessionService<A, S>>) -> Router
where
    A: AddressRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let state = ZkLoginAppState { service };

    Router::new()
        .route("/zklogin", post(handlers::zk_login::<A, S>))
        .route("/zklogin/refresh", post(handlers::refresh::<A, S>))
        .route("/zklogin/config", get(handlers::config::<A, S>))
        .route(
            "/zklogin/initialize-direct",
            post(handlers::initialize_direct::<A, S>),
        )
        .route("/zklogin/session", get(handlers::session_status::<A, S>))
        .with_state(state)
}
