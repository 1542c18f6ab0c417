//! In-Memory Repository
//!
//! Process-local store with the same uniqueness rules as the database:
//! one mapping per email, one per address, one active session per address.
//! Backs the crate tests and any embedding that runs without Postgres.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::{
    address_record::AddressRecord,
    zk_session::{SessionStatus, ZkSession},
};
use crate::domain::repository::{AddressRepository, SessionRepository};
use crate::domain::value_object::{email::Email, sui_address::SuiAddress};
use crate::error::{ZkLoginError, ZkLoginResult};

#[derive(Default)]
struct State {
    /// Keyed by normalized email
    addresses: HashMap<String, AddressRecord>,
    /// Insertion order doubles as creation order
    sessions: Vec<ZkSession>,
}

#[derive(Clone, Default)]
pub struct InMemoryZkLoginRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryZkLoginRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sessions stored for an address, oldest first
    pub async fn sessions_for(&self, address: &SuiAddress) -> Vec<ZkSession> {
        let state = self.state.read().await;
        state
            .sessions
            .iter()
            .filter(|s| &s.address == address)
            .cloned()
            .collect()
    }

    pub async fn address_count(&self) -> usize {
        self.state.read().await.addresses.len()
    }
}

impl AddressRepository for InMemoryZkLoginRepository {
    async fn insert(&self, record: &AddressRecord) -> ZkLoginResult<()> {
        let mut state = self.state.write().await;
        let taken = state.addresses.contains_key(record.email.as_str())
            || state
                .addresses
                .values()
                .any(|existing| existing.address == record.address);
        if taken {
            return Err(ZkLoginError::Conflict);
        }
        state
            .addresses
            .insert(record.email.as_str().to_string(), record.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> ZkLoginResult<Option<AddressRecord>> {
        let state = self.state.read().await;
        Ok(state.addresses.get(email.as_str()).cloned())
    }

    async fn find_by_address(&self, address: &SuiAddress) -> ZkLoginResult<Option<AddressRecord>> {
        let state = self.state.read().await;
        Ok(state
            .addresses
            .values()
            .find(|record| &record.address == address)
            .cloned())
    }

    async fn touch_by_email(
        &self,
        email: &Email,
        at: DateTime<Utc>,
    ) -> ZkLoginResult<Option<AddressRecord>> {
        let mut state = self.state.write().await;
        Ok(state.addresses.get_mut(email.as_str()).map(|record| {
            record.last_used_at = at;
            record.clone()
        }))
    }
}

impl SessionRepository for InMemoryZkLoginRepository {
    async fn create(&self, session: &ZkSession) -> ZkLoginResult<()> {
        let mut state = self.state.write().await;
        let has_active = state
            .sessions
            .iter()
            .any(|s| s.address == session.address && s.status == SessionStatus::Active);
        if session.status == SessionStatus::Active && has_active {
            return Err(ZkLoginError::Conflict);
        }
        state.sessions.push(session.clone());
        Ok(())
    }

    async fn expire_all_active(&self, address: &SuiAddress) -> ZkLoginResult<u64> {
        let mut state = self.state.write().await;
        let mut expired = 0;
        for session in state
            .sessions
            .iter_mut()
            .filter(|s| &s.address == address && s.status == SessionStatus::Active)
        {
            session.status = SessionStatus::Expired;
            expired += 1;
        }
        Ok(expired)
    }

    async fn find_active_valid(
        &self,
        address: &SuiAddress,
        now: DateTime<Utc>,
    ) -> ZkLoginResult<Option<ZkSession>> {
        let state = self.state.read().await;
        Ok(state
            .sessions
            .iter()
            .rev()
            .find(|s| &s.address == address && s.is_valid_at(now))
            .cloned())
    }

    async fn find_latest(&self, address: &SuiAddress) -> ZkLoginResult<Option<ZkSession>> {
        let state = self.state.read().await;
        Ok(state
            .sessions
            .iter()
            .rev()
            .find(|s| &s.address == address)
            .cloned())
    }

    async fn mark_expired(&self, now: DateTime<Utc>) -> ZkLoginResult<u64> {
        let mut state = self.state.write().await;
        let mut swept = 0;
        for session in state
            .sessions
            .iter_mut()
            .filter(|s| s.status == SessionStatus::Active && s.is_expired_at(now))
        {
            session.status = SessionStatus::Expired;
            swept += 1;
        }
        Ok(swept)
    }
}
