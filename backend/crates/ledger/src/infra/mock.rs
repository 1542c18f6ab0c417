//! Mock Ledger
//!
//! Fabricates digests and object ids; nothing touches a chain. Pool reads
//! echo fixed demo values.

use std::sync::Arc;

use chrono::Utc;
use zklogin::models::sui_address::SuiAddress;

use platform::crypto::random_bytes;

use crate::application::config::LedgerConfig;
use crate::domain::gateway::LedgerGateway;
use crate::domain::model::{
    Balance, ChallengeCreated, ChallengeJoined, ChallengeParams, ExerciseRecorded, NftMetadata,
    NftMinted, ObjectId, PoolInfo, WinnerStatus,
};
use crate::error::LedgerResult;

#[derive(Debug, Clone)]
pub struct MockLedger {
    config: Arc<LedgerConfig>,
}

impl MockLedger {
    pub fn new(config: Arc<LedgerConfig>) -> Self {
        Self { config }
    }
}

impl LedgerGateway for MockLedger {
    async fn initialize_challenge(
        &self,
        params: ChallengeParams,
        signer: &SuiAddress,
    ) -> LedgerResult<ChallengeCreated> {
        let created = ChallengeCreated {
            tx_digest: ObjectId::random(),
            pool_object_id: ObjectId::random(),
        };
        tracing::info!(
            %signer,
            pool = %created.pool_object_id,
            target_exercises = params.target_exercises,
            duration_days = params.duration_days,
            "Mock challenge pool created"
        );
        Ok(created)
    }

    async fn join_challenge(
        &self,
        pool_id: &ObjectId,
        participant: &SuiAddress,
    ) -> LedgerResult<ChallengeJoined> {
        let joined = ChallengeJoined {
            tx_digest: ObjectId::random(),
            challenge_nft_id: ObjectId::random(),
        };
        tracing::info!(%participant, pool = %pool_id, nft = %joined.challenge_nft_id, "Mock challenge joined");
        Ok(joined)
    }

    async fn complete_exercise(
        &self,
        pool_id: &ObjectId,
        nft_id: &ObjectId,
        participant: &SuiAddress,
    ) -> LedgerResult<ExerciseRecorded> {
        tracing::info!(%participant, pool = %pool_id, nft = %nft_id, "Mock exercise recorded");
        Ok(ExerciseRecorded {
            tx_digest: ObjectId::random(),
        })
    }

    async fn create_nft(
        &self,
        metadata: &NftMetadata,
        owner: &SuiAddress,
    ) -> LedgerResult<NftMinted> {
        let minted = NftMinted {
            tx_digest: ObjectId::random(),
            nft_object_id: ObjectId::random(),
        };
        tracing::info!(%owner, name = %metadata.name, nft = %minted.nft_object_id, "Mock NFT minted");
        Ok(minted)
    }

    async fn get_pool_info(&self, pool_id: &ObjectId) -> LedgerResult<PoolInfo> {
        Ok(PoolInfo {
            object_id: pool_id.clone(),
            object_type: self.config.pool_type(),
            total_balance_mist: 1_000_000_000,
            target_exercises: 10,
            start_time_ms: Utc::now().timestamp_millis(),
            duration_days: 30,
            rewards_distributed: false,
        })
    }

    async fn get_balance(&self, _address: &SuiAddress) -> LedgerResult<Balance> {
        Ok(Balance {
            mist: self.config.fallback_balance_mist,
        })
    }

    async fn check_winner(
        &self,
        _pool_id: &ObjectId,
        _address: &SuiAddress,
    ) -> LedgerResult<WinnerStatus> {
        // Coin flip until pools settle on chain
        let is_winner = random_bytes(1).first().is_some_and(|b| b & 1 == 1);
        Ok(WinnerStatus { is_winner })
    }
}
