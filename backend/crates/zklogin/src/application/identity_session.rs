//! Identity Session Service
//!
//! Login, refresh and token validation built on the address registry and
//! the session store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::ZkSessionId;

use crate::application::{
    address_registry::AddressRegistry, config::ZkLoginConfig, session_store::SessionStore,
};
use crate::domain::clock::Clock;
use crate::domain::entity::{
    address_record::AddressIdentity,
    zk_session::{ProofMaterial, SessionOrigin, ZkSession},
};
use crate::domain::repository::{AddressRepository, SessionRepository};
use crate::domain::value_object::{
    auth_token::{decode_token, issue_token},
    email::Email,
    sui_address::SuiAddress,
};
use crate::error::{AuthFailure, ZkLoginError, ZkLoginResult};

/// Login input
#[derive(Debug, Default)]
pub struct LoginInput {
    /// Email asserted by the identity provider; `None` means anonymous
    pub email: Option<String>,
    /// Raw id token, stored with the session
    pub id_token: Option<String>,
    /// Caller nonce used as JWT randomness
    pub nonce: Option<String>,
}

/// Everything a client receives for a new session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub address: SuiAddress,
    pub email: Option<Email>,
    pub auth_token: String,
    pub session_id: ZkSessionId,
    pub proof: ProofMaterial,
    pub expires_at: DateTime<Utc>,
}

/// Identity attached to a request after its token validated
#[derive(Debug, Clone)]
pub struct ResolvedIdentity {
    pub address: SuiAddress,
    pub email: Option<Email>,
    pub session_id: ZkSessionId,
    pub proof: ProofMaterial,
    pub expires_at: DateTime<Utc>,
}

pub struct IdentitySessionService<A, S>
where
    A: AddressRepository,
    S: SessionRepository,
{
    registry: AddressRegistry<A>,
    sessions: SessionStore<S>,
    config: Arc<ZkLoginConfig>,
}

impl<A, S> IdentitySessionService<A, S>
where
    A: AddressRepository,
    S: SessionRepository,
{
    pub fn new(
        address_repo: Arc<A>,
        session_repo: Arc<S>,
        config: Arc<ZkLoginConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry: AddressRegistry::new(address_repo, Arc::clone(&clock)),
            sessions: SessionStore::new(session_repo, clock),
            config,
        }
    }

    pub fn registry(&self) -> &AddressRegistry<A> {
        &self.registry
    }

    pub fn sessions(&self) -> &SessionStore<S> {
        &self.sessions
    }

    pub fn config(&self) -> &ZkLoginConfig {
        &self.config
    }

    /// Resolve (or register) the identity and issue a fresh session.
    ///
    /// Any session still active for the address is expired first.
    pub async fn login(&self, input: LoginInput) -> ZkLoginResult<IssuedSession> {
        let identity = self.registry.get_or_create(input.email.as_deref()).await?;
        let issued = self
            .issue(
                identity,
                input.id_token,
                input.nonce.as_deref(),
                SessionOrigin::Login,
            )
            .await?;
        tracing::info!(address = %issued.address, "zkLogin session issued");
        Ok(issued)
    }

    /// Login path for clients without an identity provider round trip
    pub async fn initialize_direct(
        &self,
        email: Option<&str>,
        nonce: Option<&str>,
    ) -> ZkLoginResult<IssuedSession> {
        let identity = self.registry.get_or_create(email).await?;
        let issued = self
            .issue(identity, None, nonce, SessionOrigin::Direct)
            .await?;
        tracing::info!(address = %issued.address, "Direct zkLogin session issued");
        Ok(issued)
    }

    /// Replace the address's session with a new one.
    ///
    /// Fresh material is generated before anything is expired, so a failure
    /// here leaves the old session untouched.
    pub async fn refresh(
        &self,
        address: &SuiAddress,
        id_token: Option<String>,
        nonce: Option<&str>,
    ) -> ZkLoginResult<IssuedSession> {
        let record = self
            .registry
            .find_by_address(address)
            .await?
            .ok_or(ZkLoginError::AddressNotFound)?;

        let issued = self
            .issue(record.identity(), id_token, nonce, SessionOrigin::Refresh)
            .await?;
        tracing::info!(address = %issued.address, "zkLogin session refreshed");
        Ok(issued)
    }

    /// Resolve a token to the identity and session it stands for
    pub async fn validate(&self, token: &str) -> ZkLoginResult<ResolvedIdentity> {
        let claims = decode_token(token)?;

        let record = self
            .registry
            .find_by_address(&claims.address)
            .await?
            .ok_or(AuthFailure::AddressNotFound)?;

        if claims.email.as_deref() != Some(record.email.as_str()) {
            return Err(AuthFailure::EmailMismatch.into());
        }

        let session = self
            .sessions
            .find_active_valid(&record.address)
            .await?
            .ok_or(AuthFailure::NoActiveSession)?;

        if let Some(session_id) = claims.session_id
            && session_id != session.session_id
        {
            return Err(AuthFailure::NoActiveSession.into());
        }

        Ok(ResolvedIdentity {
            address: record.address,
            email: Some(record.email),
            session_id: session.session_id,
            proof: session.proof,
            expires_at: session.expires_at,
        })
    }

    async fn issue(
        &self,
        identity: AddressIdentity,
        id_token: Option<String>,
        nonce: Option<&str>,
        origin: SessionOrigin,
    ) -> ZkLoginResult<IssuedSession> {
        let proof = ProofMaterial::issue(&identity, &self.config.max_epoch, nonce, origin);
        let id_token = id_token.or_else(|| origin.default_id_token().map(str::to_string));

        let session = self
            .sessions
            .replace_active(&identity.address, id_token, proof, self.config.session_ttl())
            .await?;

        self.issued_from(identity, session)
    }

    fn issued_from(
        &self,
        identity: AddressIdentity,
        session: ZkSession,
    ) -> ZkLoginResult<IssuedSession> {
        let auth_token = issue_token(
            identity.email.as_ref(),
            &identity.address,
            Some(session.session_id),
        )?;

        Ok(IssuedSession {
            address: identity.address,
            email: identity.email,
            auth_token,
            session_id: session.session_id,
            proof: session.proof,
            expires_at: session.expires_at,
        })
    }
}
