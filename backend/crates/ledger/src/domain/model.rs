//! Ledger Value Types

use serde::Serialize;
use std::fmt;

use platform::crypto::{is_lower_hex, random_hex};

use crate::domain::units::format_sui;
use crate::error::{LedgerError, LedgerResult};

const MAX_TARGET_EXERCISES: u32 = 10_000;
const MAX_DURATION_DAYS: u32 = 365;
const MAX_NFT_NAME_LENGTH: usize = 128;
const MAX_NFT_TEXT_LENGTH: usize = 2048;

/// On-chain object id or transaction digest: `0x` + up to 64 hex chars
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn random() -> Self {
        Self(format!("0x{}", random_hex(32)))
    }

    pub fn parse(raw: &str) -> LedgerResult<Self> {
        let invalid = || LedgerError::InvalidRequest(format!("Invalid object id: {raw}"));
        let raw = raw.trim();
        let hex = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .ok_or_else(invalid)?
            .to_ascii_lowercase();
        if hex.is_empty() || hex.len() > 64 || !is_lower_hex(&hex, hex.len()) {
            return Err(invalid());
        }
        Ok(Self(format!("0x{hex}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters of a new challenge pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeParams {
    pub target_exercises: u32,
    pub duration_days: u32,
}

impl ChallengeParams {
    pub fn new(target_exercises: i64, duration_days: i64) -> LedgerResult<Self> {
        let target_exercises = u32::try_from(target_exercises)
            .ok()
            .filter(|n| (1..=MAX_TARGET_EXERCISES).contains(n))
            .ok_or_else(|| {
                LedgerError::InvalidRequest(format!(
                    "targetExercises must be between 1 and {MAX_TARGET_EXERCISES}"
                ))
            })?;
        let duration_days = u32::try_from(duration_days)
            .ok()
            .filter(|n| (1..=MAX_DURATION_DAYS).contains(n))
            .ok_or_else(|| {
                LedgerError::InvalidRequest(format!(
                    "durationDays must be between 1 and {MAX_DURATION_DAYS}"
                ))
            })?;

        Ok(Self {
            target_exercises,
            duration_days,
        })
    }
}

/// NFT mint input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl NftMetadata {
    pub fn new(
        name: &str,
        description: Option<&str>,
        image_url: Option<&str>,
    ) -> LedgerResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidRequest(
                "NFT name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_NFT_NAME_LENGTH {
            return Err(LedgerError::InvalidRequest(format!(
                "NFT name must be at most {MAX_NFT_NAME_LENGTH} characters"
            )));
        }

        let description = description.unwrap_or_default().trim().to_string();
        let image_url = image_url.unwrap_or_default().trim().to_string();
        if description.len() > MAX_NFT_TEXT_LENGTH || image_url.len() > MAX_NFT_TEXT_LENGTH {
            return Err(LedgerError::InvalidRequest(
                "NFT description or image URL too long".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            description,
            image_url,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeCreated {
    pub tx_digest: ObjectId,
    pub pool_object_id: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeJoined {
    pub tx_digest: ObjectId,
    pub challenge_nft_id: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseRecorded {
    pub tx_digest: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftMinted {
    pub tx_digest: ObjectId,
    pub nft_object_id: ObjectId,
}

/// Challenge pool state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolInfo {
    pub object_id: ObjectId,
    /// Fully qualified Move type
    pub object_type: String,
    pub total_balance_mist: u64,
    pub target_exercises: u32,
    pub start_time_ms: i64,
    pub duration_days: u32,
    pub rewards_distributed: bool,
}

/// Address balance in MIST
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub mist: u64,
}

impl Balance {
    /// Four-decimal SUI string
    pub fn sui(&self) -> String {
        format_sui(self.mist)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinnerStatus {
    pub is_winner: bool,
}
