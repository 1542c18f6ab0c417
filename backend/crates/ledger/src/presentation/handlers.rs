//! HTTP Handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;

use zklogin::ResolvedIdentity;
use zklogin::models::sui_address::SuiAddress;

use crate::domain::gateway::LedgerGateway;
use crate::domain::model::{ChallengeParams, NftMetadata, ObjectId};
use crate::error::{LedgerError, LedgerResult};
use crate::presentation::dto::{
    BalanceResponse, CompleteExerciseRequest, CreateNftRequest, CreateNftResponse,
    InitChallengeRequest, InitChallengeResponse, JoinChallengeRequest, JoinChallengeResponse,
    PoolInfoResponse, PoolObjectDto, TxResponse, WinnerResponse,
};

/// Shared state for ledger handlers
pub struct LedgerAppState<G>
where
    G: LedgerGateway + Send + Sync + 'static,
{
    pub gateway: Arc<G>,
}

impl<G> Clone for LedgerAppState<G>
where
    G: LedgerGateway + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

/// The address a write acts for is always the session's. A body
/// `userAddress` is tolerated only when it names the same address.
pub fn acting_address(
    identity: &ResolvedIdentity,
    claimed: Option<&str>,
) -> LedgerResult<SuiAddress> {
    match claimed.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(identity.address.clone()),
        Some(raw) => {
            let claimed = SuiAddress::parse(raw)
                .ok_or_else(|| LedgerError::InvalidRequest("Invalid userAddress".to_string()))?;
            if claimed != identity.address {
                return Err(LedgerError::Forbidden(
                    "userAddress does not match the signed-in address".to_string(),
                ));
            }
            Ok(claimed)
        }
    }
}

fn parse_address(raw: &str) -> LedgerResult<SuiAddress> {
    SuiAddress::parse(raw)
        .ok_or_else(|| LedgerError::InvalidRequest(format!("Invalid Sui address: {raw}")))
}

// ============================================================================
// Challenge
// ============================================================================

/// POST /api/sui/challenge/init
pub async fn init_challenge<G>(
    State(state): State<LedgerAppState<G>>,
    Extension(identity): Extension<ResolvedIdentity>,
    Json(req): Json<InitChallengeRequest>,
) -> LedgerResult<Json<InitChallengeResponse>>
where
    G: LedgerGateway + Send + Sync + 'static,
{
    let signer = acting_address(&identity, req.user_address.as_deref())?;
    let params = ChallengeParams::new(req.target_exercises, req.duration_days)?;

    let created = state.gateway.initialize_challenge(params, &signer).await?;

    Ok(Json(InitChallengeResponse {
        success: true,
        tx_digest: created.tx_digest.to_string(),
        pool_object_id: created.pool_object_id.to_string(),
    }))
}

/// POST /api/sui/challenge/join
pub async fn join_challenge<G>(
    State(state): State<LedgerAppState<G>>,
    Extension(identity): Extension<ResolvedIdentity>,
    Json(req): Json<JoinChallengeRequest>,
) -> LedgerResult<Json<JoinChallengeResponse>>
where
    G: LedgerGateway + Send + Sync + 'static,
{
    let participant = acting_address(&identity, req.user_address.as_deref())?;
    let pool_id = ObjectId::parse(&req.pool_id)?;

    let joined = state.gateway.join_challenge(&pool_id, &participant).await?;

    Ok(Json(JoinChallengeResponse {
        success: true,
        tx_digest: joined.tx_digest.to_string(),
        challenge_nft_id: joined.challenge_nft_id.to_string(),
    }))
}

/// POST /api/sui/challenge/complete-exercise
pub async fn complete_exercise<G>(
    State(state): State<LedgerAppState<G>>,
    Extension(identity): Extension<ResolvedIdentity>,
    Json(req): Json<CompleteExerciseRequest>,
) -> LedgerResult<Json<TxResponse>>
where
    G: LedgerGateway + Send + Sync + 'static,
{
    let participant = acting_address(&identity, req.user_address.as_deref())?;
    let pool_id = ObjectId::parse(&req.pool_id)?;
    let nft_id = ObjectId::parse(&req.nft_id)?;

    let recorded = state
        .gateway
        .complete_exercise(&pool_id, &nft_id, &participant)
        .await?;

    Ok(Json(TxResponse {
        success: true,
        tx_digest: recorded.tx_digest.to_string(),
    }))
}

// ============================================================================
// NFT
// ============================================================================

/// POST /api/sui/nft/create
pub async fn create_nft<G>(
    State(state): State<LedgerAppState<G>>,
    Extension(identity): Extension<ResolvedIdentity>,
    Json(req): Json<CreateNftRequest>,
) -> LedgerResult<Json<CreateNftResponse>>
where
    G: LedgerGateway + Send + Sync + 'static,
{
    let owner = acting_address(&identity, req.user_address.as_deref())?;
    let metadata = NftMetadata::new(
        &req.name,
        req.description.as_deref(),
        req.image_url.as_deref(),
    )?;

    let minted = state.gateway.create_nft(&metadata, &owner).await?;

    Ok(Json(CreateNftResponse {
        success: true,
        tx_digest: minted.tx_digest.to_string(),
        nft_object_id: minted.nft_object_id.to_string(),
    }))
}

// ============================================================================
// Reads
// ============================================================================

/// GET /api/sui/pool/{id}
pub async fn pool_info<G>(
    State(state): State<LedgerAppState<G>>,
    Path(id): Path<String>,
) -> LedgerResult<Json<PoolInfoResponse>>
where
    G: LedgerGateway + Send + Sync + 'static,
{
    let pool_id = ObjectId::parse(&id)?;
    let pool = state.gateway.get_pool_info(&pool_id).await?;

    Ok(Json(PoolInfoResponse {
        success: true,
        pool_info: PoolObjectDto::from(&pool),
    }))
}

/// GET /api/sui/balance/{address}
pub async fn balance<G>(
    State(state): State<LedgerAppState<G>>,
    viewer: Option<Extension<ResolvedIdentity>>,
    Path(address): Path<String>,
) -> LedgerResult<Json<BalanceResponse>>
where
    G: LedgerGateway + Send + Sync + 'static,
{
    let address = parse_address(&address)?;
    let own = viewer.is_some_and(|Extension(v)| v.address == address);
    tracing::debug!(%address, own, "Balance lookup");

    let balance = state.gateway.get_balance(&address).await?;

    Ok(Json(BalanceResponse {
        success: true,
        balance: balance.sui(),
    }))
}

/// GET /api/sui/winner/{pool_id}/{address}
pub async fn winner<G>(
    State(state): State<LedgerAppState<G>>,
    Path((pool_id, address)): Path<(String, String)>,
) -> LedgerResult<Json<WinnerResponse>>
where
    G: LedgerGateway + Send + Sync + 'static,
{
    let pool_id = ObjectId::parse(&pool_id)?;
    let address = parse_address(&address)?;

    let status = state.gateway.check_winner(&pool_id, &address).await?;

    Ok(Json(WinnerResponse {
        success: true,
        is_winner: status.is_winner,
    }))
}
