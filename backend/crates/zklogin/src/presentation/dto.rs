//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::identity_session::IssuedSession;
use crate::domain::entity::zk_session::ProofMaterial;

// ============================================================================
// Proof Material
// ============================================================================

/// Proof material as clients consume it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkProofDto {
    pub ephemeral_public_key: String,
    pub ephemeral_private_key: String,
    pub address_seed: String,
    pub user_salt: String,
    pub max_epoch: String,
    pub jwt_randomness: String,
    pub user_signature: String,
    /// Prover inputs, always empty until a prover is wired in
    pub inputs: serde_json::Value,
}

impl From<&ProofMaterial> for ZkProofDto {
    fn from(proof: &ProofMaterial) -> Self {
        Self {
            ephemeral_public_key: proof.ephemeral.public_key.clone(),
            ephemeral_private_key: proof.ephemeral.private_key.clone(),
            address_seed: proof.address_seed.as_str().to_string(),
            user_salt: proof.user_salt.as_str().to_string(),
            max_epoch: proof.max_epoch.clone(),
            jwt_randomness: proof.jwt_randomness.clone(),
            user_signature: proof.user_signature.clone(),
            inputs: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// zkLogin request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkLoginRequest {
    pub id_token: Option<String>,
    pub access_token: Option<String>,
    pub nonce: Option<String>,
    pub google_user_id: Option<String>,
    pub email: Option<String>,
}

/// zkLogin response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkLoginResponse {
    pub success: bool,
    pub address: String,
    pub zk_proof: ZkProofDto,
    pub auth_token: String,
    pub expires_at_ms: i64,
}

impl From<&IssuedSession> for ZkLoginResponse {
    fn from(issued: &IssuedSession) -> Self {
        Self {
            success: true,
            address: issued.address.to_string(),
            zk_proof: ZkProofDto::from(&issued.proof),
            auth_token: issued.auth_token.clone(),
            expires_at_ms: issued.expires_at.timestamp_millis(),
        }
    }
}

// ============================================================================
// Refresh
// ============================================================================

/// Refresh request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub sui_address: Option<String>,
    pub id_token: Option<String>,
    pub nonce: Option<String>,
}

/// Refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub success: bool,
    pub zk_proof: ZkProofDto,
    pub auth_token: String,
    pub expires_at_ms: i64,
}

impl From<&IssuedSession> for RefreshResponse {
    fn from(issued: &IssuedSession) -> Self {
        Self {
            success: true,
            zk_proof: ZkProofDto::from(&issued.proof),
            auth_token: issued.auth_token.clone(),
            expires_at_ms: issued.expires_at.timestamp_millis(),
        }
    }
}

// ============================================================================
// Direct Initialization
// ============================================================================

/// Direct initialization request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeDirectRequest {
    pub email: Option<String>,
    pub nonce: Option<String>,
}

/// Direct initialization response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeDirectResponse {
    pub success: bool,
    pub sui_address: String,
    pub zk_proof: ZkProofDto,
    pub auth_token: String,
    pub expires_at_ms: i64,
}

impl From<&IssuedSession> for InitializeDirectResponse {
    fn from(issued: &IssuedSession) -> Self {
        Self {
            success: true,
            sui_address: issued.address.to_string(),
            zk_proof: ZkProofDto::from(&issued.proof),
            auth_token: issued.auth_token.clone(),
            expires_at_ms: issued.expires_at.timestamp_millis(),
        }
    }
}

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkLoginConfigDto {
    pub max_epoch: String,
    pub jwt_issuer: String,
    pub network_env: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub success: bool,
    pub config: ZkLoginConfigDto,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub address: Option<String>,
    pub email: Option<String>,
    pub expires_at_ms: Option<i64>,
}
