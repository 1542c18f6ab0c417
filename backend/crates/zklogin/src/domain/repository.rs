//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the infra layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::{address_record::AddressRecord, zk_session::ZkSession};
use crate::domain::value_object::{email::Email, sui_address::SuiAddress};
use crate::error::ZkLoginResult;

/// Address mapping repository trait
#[trait_variant::make(AddressRepository: Send)]
pub trait LocalAddressRepository {
    /// Insert a new mapping; `ZkLoginError::Conflict` if the email or the
    /// address is already taken
    async fn insert(&self, record: &AddressRecord) -> ZkLoginResult<()>;

    /// Find mapping by normalized email
    async fn find_by_email(&self, email: &Email) -> ZkLoginResult<Option<AddressRecord>>;

    /// Find mapping by address
    async fn find_by_address(&self, address: &SuiAddress) -> ZkLoginResult<Option<AddressRecord>>;

    /// Set `last_used_at` and return the updated mapping, if any
    async fn touch_by_email(
        &self,
        email: &Email,
        at: DateTime<Utc>,
    ) -> ZkLoginResult<Option<AddressRecord>>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Store a new active session; `ZkLoginError::Conflict` if the address
    /// already has an active one
    async fn create(&self, session: &ZkSession) -> ZkLoginResult<()>;

    /// Mark every active session of an address expired in one statement
    async fn expire_all_active(&self, address: &SuiAddress) -> ZkLoginResult<u64>;

    /// Newest session with status active and `expires_at > now`
    async fn find_active_valid(
        &self,
        address: &SuiAddress,
        now: DateTime<Utc>,
    ) -> ZkLoginResult<Option<ZkSession>>;

    /// Newest session of an address regardless of status
    async fn find_latest(&self, address: &SuiAddress) -> ZkLoginResult<Option<ZkSession>>;

    /// Rewrite active sessions whose expiry has passed; rows are never deleted
    async fn mark_expired(&self, now: DateTime<Utc>) -> ZkLoginResult<u64>;
}
