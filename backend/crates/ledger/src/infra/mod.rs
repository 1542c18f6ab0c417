//! Infrastructure Layer
//!
//! Gateway implementations.

pub mod mock;
pub mod sui_rpc;

use std::sync::Arc;

use zklogin::models::sui_address::SuiAddress;

use crate::application::config::{LedgerConfig, LedgerMode};
use crate::domain::gateway::LedgerGateway;
use crate::domain::model::{
    Balance, ChallengeCreated, ChallengeJoined, ChallengeParams, ExerciseRecorded, NftMetadata,
    NftMinted, ObjectId, PoolInfo, WinnerStatus,
};
use crate::error::LedgerResult;

pub use mock::MockLedger;
pub use sui_rpc::SuiRpcLedger;

/// Gateway selected from configuration at startup
#[derive(Clone)]
pub enum LedgerBackend {
    Mock(MockLedger),
    Rpc(SuiRpcLedger),
}

impl LedgerBackend {
    pub fn from_config(config: Arc<LedgerConfig>) -> LedgerResult<Self> {
        match config.mode {
            LedgerMode::Mock => Ok(LedgerBackend::Mock(MockLedger::new(config))),
            LedgerMode::Rpc => Ok(LedgerBackend::Rpc(SuiRpcLedger::new(config)?)),
        }
    }
}

impl LedgerGateway for LedgerBackend {
    async fn initialize_challenge(
        &self,
        params: ChallengeParams,
        signer: &SuiAddress,
    ) -> LedgerResult<ChallengeCreated> {
        match self {
            LedgerBackend::Mock(l) => l.initialize_challenge(params, signer).await,
            LedgerBackend::Rpc(l) => l.initialize_challenge(params, signer).await,
        }
    }

    async fn join_challenge(
        &self,
        pool_id: &ObjectId,
        participant: &SuiAddress,
    ) -> LedgerResult<ChallengeJoined> {
        match self {
            LedgerBackend::Mock(l) => l.join_challenge(pool_id, participant).await,
            LedgerBackend::Rpc(l) => l.join_challenge(pool_id, participant).await,
        }
    }

    async fn complete_exercise(
        &self,
        pool_id: &ObjectId,
        nft_id: &ObjectId,
        participant: &SuiAddress,
    ) -> LedgerResult<ExerciseRecorded> {
        match self {
            LedgerBackend::Mock(l) => l.complete_exercise(pool_id, nft_id, participant).await,
            LedgerBackend::Rpc(l) => l.complete_exercise(pool_id, nft_id, participant).await,
        }
    }

    async fn create_nft(
        &self,
        metadata: &NftMetadata,
        owner: &SuiAddress,
    ) -> LedgerResult<NftMinted> {
        match self {
            LedgerBackend::Mock(l) => l.create_nft(metadata, owner).await,
            LedgerBackend::Rpc(l) => l.create_nft(metadata, owner).await,
        }
    }

    async fn get_pool_info(&self, pool_id: &ObjectId) -> LedgerResult<PoolInfo> {
        match self {
            LedgerBackend::Mock(l) => l.get_pool_info(pool_id).await,
            LedgerBackend::Rpc(l) => l.get_pool_info(pool_id).await,
        }
    }

    async fn get_balance(&self, address: &SuiAddress) -> LedgerResult<Balance> {
        match self {
            LedgerBackend::Mock(l) => l.get_balance(address).await,
            LedgerBackend::Rpc(l) => l.get_balance(address).await,
        }
    }

    async fn check_winner(
        &self,
        pool_id: &ObjectId,
        address: &SuiAddress,
    ) -> LedgerResult<WinnerStatus> {
        match self {
            LedgerBackend::Mock(l) => l.check_winner(pool_id, address).await,
            LedgerBackend::Rpc(l) => l.check_winner(pool_id, address).await,
        }
    }
}
