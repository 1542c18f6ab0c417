//! Ledger Routers

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::gateway::LedgerGateway;
use crate::presentation::handlers::{self, LedgerAppState};

/// Write routes; mount behind `zklogin::middleware::require_sui_token`
pub fn protected_routes<G>(gateway: Arc<G>) -> Router
where
    G: LedgerGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/challenge/init", post(handlers::init_challenge::<G>))
        .route("/challenge/join", post(handlers::join_challenge::<G>))
        .route(
            "/challenge/complete-exercise",
            post(handlers::complete_exercise::<G>),
        )
        .route("/nft/create", post(handlers::create_nft::<G>))
        .with_state(LedgerAppState { gateway })
}

/// Read routes; mount behind `zklogin::middleware::check_sui_token`
pub fn public_routes<G>(gateway: Arc<G>) -> Router
where
    G: LedgerGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/pool/{id}", get(handlers::pool_info::<G>))
        .route("/balance/{address}", get(handlers::balance::<G>))
        .route("/winner/{pool_id}/{address}", get(handlers::winner::<G>))
        .with_state(LedgerAppState { gateway })
}
