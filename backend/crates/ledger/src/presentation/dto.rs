//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::model::PoolInfo;

// ============================================================================
// Challenge
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitChallengeRequest {
    pub target_exercises: i64,
    pub duration_days: i64,
    /// Must match the signed-in address when present
    pub user_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitChallengeResponse {
    pub success: bool,
    pub tx_digest: String,
    pub pool_object_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinChallengeRequest {
    pub pool_id: String,
    pub user_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinChallengeResponse {
    pub success: bool,
    pub tx_digest: String,
    pub challenge_nft_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteExerciseRequest {
    pub pool_id: String,
    pub nft_id: String,
    pub user_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxResponse {
    pub success: bool,
    pub tx_digest: String,
}

// ============================================================================
// NFT
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNftRequest {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub user_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNftResponse {
    pub success: bool,
    pub tx_digest: String,
    pub nft_object_id: String,
}

// ============================================================================
// Reads
// ============================================================================

/// Pool object in the node's `sui_getObject` layout
#[derive(Debug, Clone, Serialize)]
pub struct PoolObjectDto {
    #[serde(rename = "objectId")]
    pub object_id: String,
    pub content: PoolContentDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolContentDto {
    #[serde(rename = "dataType")]
    pub data_type: &'static str,
    #[serde(rename = "type")]
    pub object_type: String,
    pub fields: PoolFieldsDto,
}

/// Move struct fields; u64 values are strings as the node renders them
#[derive(Debug, Clone, Serialize)]
pub struct PoolFieldsDto {
    pub id: PoolUidDto,
    pub total_balance: PoolBalanceDto,
    pub target_exercises: String,
    pub start_time: String,
    pub duration_days: String,
    pub rewards_distributed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolUidDto {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolBalanceDto {
    pub value: String,
}

impl From<&PoolInfo> for PoolObjectDto {
    fn from(pool: &PoolInfo) -> Self {
        Self {
            object_id: pool.object_id.to_string(),
            content: PoolContentDto {
                data_type: "moveObject",
                object_type: pool.object_type.clone(),
                fields: PoolFieldsDto {
                    id: PoolUidDto {
                        id: pool.object_id.to_string(),
                    },
                    total_balance: PoolBalanceDto {
                        value: pool.total_balance_mist.to_string(),
                    },
                    target_exercises: pool.target_exercises.to_string(),
                    start_time: pool.start_time_ms.to_string(),
                    duration_days: pool.duration_days.to_string(),
                    rewards_distributed: pool.rewards_distributed,
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolInfoResponse {
    pub success: bool,
    pub pool_info: PoolObjectDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub success: bool,
    /// SUI with four decimals
    pub balance: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerResponse {
    pub success: bool,
    pub is_winner: bool,
}
