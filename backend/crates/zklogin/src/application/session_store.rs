//! Session Store
//!
//! Lifecycle of zkLogin sessions for an address. Validity is always
//! computed against the injected clock; a stored `active` status alone is
//! never trusted.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::clock::Clock;
use crate::domain::entity::zk_session::{ProofMaterial, ZkSession};
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::sui_address::SuiAddress;
use crate::error::{ZkLoginError, ZkLoginResult};

pub struct SessionStore<S>
where
    S: SessionRepository,
{
    repo: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for SessionStore<S>
where
    S: SessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S> SessionStore<S>
where
    S: SessionRepository,
{
    pub fn new(repo: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Store a new active session expiring `ttl` from now.
    ///
    /// Prior sessions are left alone; storage rejects a second active
    /// session for the address with `Conflict`.
    pub async fn create_session(
        &self,
        address: &SuiAddress,
        id_token: Option<String>,
        proof: ProofMaterial,
        ttl: Duration,
    ) -> ZkLoginResult<ZkSession> {
        let session = ZkSession::new(address.clone(), id_token, proof, ttl, self.clock.now());
        self.repo.create(&session).await?;
        Ok(session)
    }

    /// Expire whatever is active for the address, then store the new session.
    ///
    /// If a concurrent writer slips an active session in between, it is
    /// expired and the insert retried once; the later writer wins.
    pub async fn replace_active(
        &self,
        address: &SuiAddress,
        id_token: Option<String>,
        proof: ProofMaterial,
        ttl: Duration,
    ) -> ZkLoginResult<ZkSession> {
        let expired = self.repo.expire_all_active(address).await?;
        if expired > 0 {
            tracing::debug!(%address, expired, "Expired previous sessions");
        }

        match self
            .create_session(address, id_token.clone(), proof.clone(), ttl)
            .await
        {
            Err(ZkLoginError::Conflict) => {
                tracing::debug!(%address, "Concurrent session issued, superseding it");
                self.repo.expire_all_active(address).await?;
                self.create_session(address, id_token, proof, ttl).await
            }
            result => result,
        }
    }

    pub async fn expire_all_active(&self, address: &SuiAddress) -> ZkLoginResult<u64> {
        self.repo.expire_all_active(address).await
    }

    /// Newest session that is active and unexpired right now
    pub async fn find_active_valid(
        &self,
        address: &SuiAddress,
    ) -> ZkLoginResult<Option<ZkSession>> {
        let now = self.clock.now();
        let session = self.repo.find_active_valid(address, now).await?;
        Ok(session.filter(|s| s.is_valid_at(now)))
    }

    /// Newest session regardless of status
    pub async fn find_by_address(&self, address: &SuiAddress) -> ZkLoginResult<Option<ZkSession>> {
        self.repo.find_latest(address).await
    }

    /// Rewrite stale active rows to expired
    pub async fn sweep_expired(&self) -> ZkLoginResult<u64> {
        let swept = self.repo.mark_expired(self.clock.now()).await?;
        if swept > 0 {
            tracing::info!(swept, "Marked stale sessions expired");
        }
        Ok(swept)
    }
}
