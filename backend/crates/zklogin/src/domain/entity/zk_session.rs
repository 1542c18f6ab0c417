//! zkLogin Session Entity
//!
//! One issued session: proof material plus a lifecycle status. A session is
//! usable only while `status == Active` and `expires_at` is in the future.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use kernel::id::ZkSessionId;

use crate::domain::entity::address_record::AddressIdentity;
use crate::domain::value_object::{
    key_material::{AddressSeed, EphemeralKeyPair, UserSalt, jwt_randomness},
    sui_address::SuiAddress,
};

/// Session lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Expired,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Expired => "expired",
        }
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SessionStatus::Active),
            "expired" => Ok(SessionStatus::Expired),
            other => Err(format!("Unknown session status: {other}")),
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a session came from; decides the placeholder signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    Login,
    Refresh,
    Direct,
}

impl SessionOrigin {
    pub fn user_signature(&self) -> &'static str {
        match self {
            SessionOrigin::Login => "placeholder_signature",
            SessionOrigin::Refresh => "refreshed_placeholder_signature",
            SessionOrigin::Direct => "direct_login_signature",
        }
    }

    /// Stand-in id token when the caller supplied none
    pub fn default_id_token(&self) -> Option<&'static str> {
        match self {
            SessionOrigin::Login => None,
            SessionOrigin::Refresh => Some("refresh_token"),
            SessionOrigin::Direct => Some("direct_login"),
        }
    }
}

/// Material a client needs to assemble a zkLogin signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofMaterial {
    pub ephemeral: EphemeralKeyPair,
    pub address_seed: AddressSeed,
    pub user_salt: UserSalt,
    pub max_epoch: String,
    pub jwt_randomness: String,
    pub user_signature: String,
}

impl ProofMaterial {
    /// Fresh ephemeral keys bound to the identity's salt and seed
    pub fn issue(
        identity: &AddressIdentity,
        max_epoch: &str,
        nonce: Option<&str>,
        origin: SessionOrigin,
    ) -> Self {
        Self {
            ephemeral: EphemeralKeyPair::generate(),
            address_seed: identity.address_seed.clone(),
            user_salt: identity.salt.clone(),
            max_epoch: max_epoch.to_string(),
            jwt_randomness: jwt_randomness(nonce),
            user_signature: origin.user_signature().to_string(),
        }
    }
}

/// Stored session
#[derive(Debug, Clone)]
pub struct ZkSession {
    pub session_id: ZkSessionId,
    pub address: SuiAddress,
    pub id_token: Option<String>,
    pub proof: ProofMaterial,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ZkSession {
    /// New active session expiring `ttl` after `now`
    pub fn new(
        address: SuiAddress,
        id_token: Option<String>,
        proof: ProofMaterial,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: ZkSessionId::new(),
            address,
            id_token,
            proof,
            status: SessionStatus::Active,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.status == SessionStatus::Active && !self.is_expired_at(now)
    }

    /// Status as a reader should see it: an active row past its expiry
    /// counts as expired even before the sweep rewrites it.
    pub fn effective_status(&self, now: DateTime<Utc>) -> SessionStatus {
        if self.is_valid_at(now) {
            SessionStatus::Active
        } else {
            SessionStatus::Expired
        }
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}
