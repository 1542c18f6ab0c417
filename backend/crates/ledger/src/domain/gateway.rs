//! Ledger Gateway
//!
//! Interface to the chain. Callers pass the address resolved from the
//! session; implementations never pick the acting address themselves.

use zklogin::models::sui_address::SuiAddress;

use crate::domain::model::{
    Balance, ChallengeCreated, ChallengeJoined, ChallengeParams, ExerciseRecorded, NftMetadata,
    NftMinted, ObjectId, PoolInfo, WinnerStatus,
};
use crate::error::LedgerResult;

#[trait_variant::make(LedgerGateway: Send)]
pub trait LocalLedgerGateway {
    /// Create a challenge pool signed by `signer`
    async fn initialize_challenge(
        &self,
        params: ChallengeParams,
        signer: &SuiAddress,
    ) -> LedgerResult<ChallengeCreated>;

    /// Join a pool; mints the participant's challenge NFT
    async fn join_challenge(
        &self,
        pool_id: &ObjectId,
        participant: &SuiAddress,
    ) -> LedgerResult<ChallengeJoined>;

    /// Record one completed exercise on the participant's challenge NFT
    async fn complete_exercise(
        &self,
        pool_id: &ObjectId,
        nft_id: &ObjectId,
        participant: &SuiAddress,
    ) -> LedgerResult<ExerciseRecorded>;

    async fn create_nft(
        &self,
        metadata: &NftMetadata,
        owner: &SuiAddress,
    ) -> LedgerResult<NftMinted>;

    async fn get_pool_info(&self, pool_id: &ObjectId) -> LedgerResult<PoolInfo>;

    async fn get_balance(&self, address: &SuiAddress) -> LedgerResult<Balance>;

    async fn check_winner(
        &self,
        pool_id: &ObjectId,
        address: &SuiAddress,
    ) -> LedgerResult<WinnerStatus>;
}
