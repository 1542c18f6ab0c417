//! Sui JSON-RPC Ledger
//!
//! Balance reads go to a full node. Transaction building and signing are
//! not wired up, so writes and pool reads are served by the mock.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use zklogin::models::sui_address::SuiAddress;

use crate::application::config::LedgerConfig;
use crate::domain::gateway::LedgerGateway;
use crate::domain::model::{
    Balance, ChallengeCreated, ChallengeJoined, ChallengeParams, ExerciseRecorded, NftMetadata,
    NftMinted, ObjectId, PoolInfo, WinnerStatus,
};
use crate::domain::units::parse_mist;
use crate::error::{LedgerError, LedgerResult};
use crate::infra::mock::MockLedger;

const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceResult {
    #[serde(default)]
    total_balance: Option<String>,
}

/// Extract the MIST total from a `suix_getBalance` response body.
///
/// A result without `totalBalance` is an empty balance, not an error.
pub fn parse_balance_response(body: serde_json::Value) -> LedgerResult<u64> {
    let response: RpcResponse<BalanceResult> = serde_json::from_value(body)
        .map_err(|e| LedgerError::Upstream(format!("Malformed RPC response: {e}")))?;

    if let Some(err) = response.error {
        return Err(LedgerError::Upstream(format!(
            "RPC error {}: {}",
            err.code, err.message
        )));
    }

    let Some(total) = response
        .result
        .and_then(|r| r.total_balance)
        .filter(|t| !t.is_empty())
    else {
        return Ok(0);
    };

    parse_mist(&total)
        .ok_or_else(|| LedgerError::Upstream(format!("Invalid totalBalance: {total}")))
}

/// JSON-RPC body for a SUI coin balance lookup
pub fn balance_request(owner: &SuiAddress) -> serde_json::Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "suix_getBalance",
        "params": [owner.as_str(), SUI_COIN_TYPE],
    })
}

#[derive(Debug, Clone)]
pub struct SuiRpcLedger {
    client: reqwest::Client,
    config: Arc<LedgerConfig>,
    mock: MockLedger,
}

impl SuiRpcLedger {
    pub fn new(config: Arc<LedgerConfig>) -> LedgerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.rpc_timeout)
            .build()
            .map_err(|e| LedgerError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            mock: MockLedger::new(Arc::clone(&config)),
            config,
        })
    }

    async fn fetch_balance(&self, address: &SuiAddress) -> LedgerResult<u64> {
        let request = balance_request(address);

        let body: serde_json::Value = self
            .client
            .post(&self.config.node_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_balance_response(body)
    }
}

impl LedgerGateway for SuiRpcLedger {
    async fn initialize_challenge(
        &self,
        params: ChallengeParams,
        signer: &SuiAddress,
    ) -> LedgerResult<ChallengeCreated> {
        self.mock.initialize_challenge(params, signer).await
    }

    async fn join_challenge(
        &self,
        pool_id: &ObjectId,
        participant: &SuiAddress,
    ) -> LedgerResult<ChallengeJoined> {
        self.mock.join_challenge(pool_id, participant).await
    }

    async fn complete_exercise(
        &self,
        pool_id: &ObjectId,
        nft_id: &ObjectId,
        participant: &SuiAddress,
    ) -> LedgerResult<ExerciseRecorded> {
        self.mock
            .complete_exercise(pool_id, nft_id, participant)
            .await
    }

    async fn create_nft(
        &self,
        metadata: &NftMetadata,
        owner: &SuiAddress,
    ) -> LedgerResult<NftMinted> {
        self.mock.create_nft(metadata, owner).await
    }

    async fn get_pool_info(&self, pool_id: &ObjectId) -> LedgerResult<PoolInfo> {
        self.mock.get_pool_info(pool_id).await
    }

    async fn get_balance(&self, address: &SuiAddress) -> LedgerResult<Balance> {
        match self.fetch_balance(address).await {
            Ok(mist) => Ok(Balance { mist }),
            Err(e) if self.config.rpc_fallback_to_mock => {
                tracing::warn!(error = %e, %address, "Balance lookup failed, using fallback");
                self.mock.get_balance(address).await
            }
            Err(e) => Err(e),
        }
    }

    async fn check_winner(
        &self,
        pool_id: &ObjectId,
        address: &SuiAddress,
    ) -> LedgerResult<WinnerStatus> {
        self.mock.check_winner(pool_id, address).await
    }
}
