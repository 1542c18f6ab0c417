//! Tests for the zkLogin crate
//! Identity derivation, session lifecycle and the HTTP guard, run against
//! the in-memory repository and a manual clock.

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use crate::application::config::ZkLoginConfig;
    use crate::application::identity_session::{IdentitySessionService, LoginInput};
    use crate::domain::clock::ManualClock;
    use crate::infra::memory::InMemoryZkLoginRepository;

    pub type Repo = InMemoryZkLoginRepository;
    pub type Service = IdentitySessionService<Repo, Repo>;

    pub struct Harness {
        pub service: Arc<Service>,
        pub repo: Repo,
        pub clock: Arc<ManualClock>,
    }

    pub fn harness() -> Harness {
        let repo = Repo::new();
        let clock = Arc::new(ManualClock::starting_now());
        let service = IdentitySessionService::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(ZkLoginConfig::default()),
            clock.clone(),
        );
        Harness {
            service: Arc::new(service),
            repo,
            clock,
        }
    }

    pub fn login_as(email: &str) -> LoginInput {
        LoginInput {
            email: Some(email.to_string()),
            id_token: Some("id-token".to_string()),
            nonce: None,
        }
    }
}

#[cfg(test)]
mod registry_tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::{DateTime, Duration, Utc};

    use super::support::*;
    use crate::application::address_registry::AddressRegistry;
    use crate::domain::clock::{Clock, ManualClock};
    use crate::domain::entity::address_record::AddressRecord;
    use crate::domain::repository::AddressRepository;
    use crate::domain::value_object::{email::Email, sui_address::SuiAddress};
    use crate::error::ZkLoginResult;

    /// Hides the first lookup so the registry believes the email is new
    /// while another writer has already stored it.
    struct RacingRepo {
        inner: Repo,
        hide_first_lookup: AtomicBool,
    }

    impl AddressRepository for RacingRepo {
        async fn insert(&self, record: &AddressRecord) -> ZkLoginResult<()> {
            self.inner.insert(record).await
        }

        async fn find_by_email(&self, email: &Email) -> ZkLoginResult<Option<AddressRecord>> {
            self.inner.find_by_email(email).await
        }

        async fn find_by_address(
            &self,
            address: &SuiAddress,
        ) -> ZkLoginResult<Option<AddressRecord>> {
            self.inner.find_by_address(address).await
        }

        async fn touch_by_email(
            &self,
            email: &Email,
            at: DateTime<Utc>,
        ) -> ZkLoginResult<Option<AddressRecord>> {
            if self.hide_first_lookup.swap(false, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.touch_by_email(email, at).await
        }
    }

    #[tokio::test]
    async fn test_same_email_same_identity() {
        let h = harness();
        let registry = h.service.registry();

        let a = registry.get_or_create(Some("User@X.com")).await.unwrap();
        let b = registry.get_or_create(Some(" user@x.com")).await.unwrap();

        assert_eq!(a.address, b.address);
        assert_eq!(a.salt, b.salt);
        assert_eq!(a.address_seed, b.address_seed);
        assert_eq!(
            a.address.as_str(),
            format!("0x{}", platform::crypto::sha256_hex(b"user@x.com"))
        );
        assert_eq!(h.repo.address_count().await, 1);
    }

    #[tokio::test]
    async fn test_anonymous_identities_are_not_stored() {
        let h = harness();
        let registry = h.service.registry();

        let a = registry.get_or_create(None).await.unwrap();
        let b = registry.get_or_create(Some("   ")).await.unwrap();

        assert!(a.is_anonymous());
        assert_ne!(a.address, b.address);
        assert_eq!(h.repo.address_count().await, 0);
        assert!(registry.find_by_address(&a.address).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_updates_last_used() {
        let h = harness();
        let registry = h.service.registry();

        registry.get_or_create(Some("a@x.com")).await.unwrap();
        let created = registry.find_by_email("a@x.com").await.unwrap().unwrap();

        h.clock.advance(Duration::minutes(10));
        registry.get_or_create(Some("A@x.com")).await.unwrap();
        let touched = registry.find_by_email("a@x.com").await.unwrap().unwrap();

        assert_eq!(touched.created_at, created.created_at);
        assert_eq!(touched.last_used_at, created.last_used_at + Duration::minutes(10));
    }

    #[tokio::test]
    async fn test_reverse_lookup() {
        let h = harness();
        let registry = h.service.registry();

        let identity = registry.get_or_create(Some("a@x.com")).await.unwrap();
        let record = registry
            .find_by_address(&identity.address)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.email.as_str(), "a@x.com");
        assert!(registry.find_by_email("nobody@x.com").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_login_registers_once() {
        let h = harness();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = Arc::clone(&h.service);
            handles.push(tokio::spawn(async move {
                service.registry().get_or_create(Some("new@x.com")).await
            }));
        }

        let mut identities = Vec::new();
        for handle in handles {
            identities.push(handle.await.unwrap().unwrap());
        }

        let first = &identities[0];
        for identity in &identities {
            assert_eq!(identity.address, first.address);
            assert_eq!(identity.salt, first.salt);
            assert_eq!(identity.address_seed, first.address_seed);
        }
        assert_eq!(h.repo.address_count().await, 1);
    }

    #[tokio::test]
    async fn test_lost_race_adopts_winner() {
        let inner = Repo::new();
        let clock = Arc::new(ManualClock::starting_now());
        let winner = AddressRecord::new(Email::new("race@x.com").unwrap(), clock.now());
        inner.insert(&winner).await.unwrap();

        let registry = AddressRegistry::new(
            Arc::new(RacingRepo {
                inner: inner.clone(),
                hide_first_lookup: AtomicBool::new(true),
            }),
            clock,
        );

        let identity = registry.get_or_create(Some("race@x.com")).await.unwrap();
        assert_eq!(identity.address, winner.address);
        assert_eq!(identity.salt, winner.salt);
        assert_eq!(identity.address_seed, winner.address_seed);
        assert_eq!(inner.address_count().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let h = harness();
        let err = h
            .service
            .registry()
            .get_or_create(Some("a b@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::ZkLoginError::InvalidRequest(_)));
    }
}

#[cfg(test)]
mod session_tests {
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Duration, Utc};

    use super::support::*;
    use crate::application::session_store::SessionStore;
    use crate::domain::clock::{Clock, ManualClock};
    use crate::domain::entity::address_record::AddressIdentity;
    use crate::domain::entity::zk_session::{
        ProofMaterial, SessionOrigin, SessionStatus, ZkSession,
    };
    use crate::domain::repository::SessionRepository;
    use crate::domain::value_object::sui_address::SuiAddress;
    use crate::error::{AuthFailure, ZkLoginError, ZkLoginResult};

    /// Lets a competing writer store an active session right after the
    /// store expired the old ones, so the first insert hits `Conflict`.
    struct RacingSessions {
        inner: Repo,
        competitor: Mutex<Option<ZkSession>>,
    }

    impl SessionRepository for RacingSessions {
        async fn create(&self, session: &ZkSession) -> ZkLoginResult<()> {
            let competitor = self.competitor.lock().unwrap().take();
            if let Some(competitor) = competitor {
                self.inner.create(&competitor).await?;
            }
            self.inner.create(session).await
        }

        async fn expire_all_active(&self, address: &SuiAddress) -> ZkLoginResult<u64> {
            self.inner.expire_all_active(address).await
        }

        async fn find_active_valid(
            &self,
            address: &SuiAddress,
            now: DateTime<Utc>,
        ) -> ZkLoginResult<Option<ZkSession>> {
            self.inner.find_active_valid(address, now).await
        }

        async fn find_latest(&self, address: &SuiAddress) -> ZkLoginResult<Option<ZkSession>> {
            self.inner.find_latest(address).await
        }

        async fn mark_expired(&self, now: DateTime<Utc>) -> ZkLoginResult<u64> {
            self.inner.mark_expired(now).await
        }
    }

    fn proof_for(identity: &AddressIdentity, origin: SessionOrigin) -> ProofMaterial {
        ProofMaterial::issue(identity, "5", None, origin)
    }

    async fn valid_count(h: &Harness, address: &SuiAddress) -> usize {
        let now = h.clock.now();
        h.repo
            .sessions_for(address)
            .await
            .iter()
            .filter(|s| s.is_valid_at(now))
            .count()
    }

    #[tokio::test]
    async fn test_login_issues_fresh_ephemeral_keys() {
        let h = harness();

        let first = h.service.login(login_as("User@X.com")).await.unwrap();
        let second = h.service.login(login_as("user@x.com")).await.unwrap();

        assert_eq!(first.address, second.address);
        assert_eq!(first.proof.user_salt, second.proof.user_salt);
        assert_eq!(first.proof.address_seed, second.proof.address_seed);
        assert_ne!(
            first.proof.ephemeral.public_key,
            second.proof.ephemeral.public_key
        );
        assert_eq!(first.proof.max_epoch, "5");
        assert_eq!(first.proof.user_signature, "placeholder_signature");
    }

    #[tokio::test]
    async fn test_refresh_invalidates_previous_token() {
        let h = harness();

        let login = h.service.login(login_as("a@x.com")).await.unwrap();
        let refreshed = h
            .service
            .refresh(&login.address, None, None)
            .await
            .unwrap();

        let err = h.service.validate(&login.auth_token).await.unwrap_err();
        assert!(matches!(err, ZkLoginError::Auth(AuthFailure::NoActiveSession)));

        let identity = h.service.validate(&refreshed.auth_token).await.unwrap();
        assert_eq!(identity.address, login.address);
        assert_eq!(identity.session_id, refreshed.session_id);
        assert_eq!(valid_count(&h, &login.address).await, 1);
    }

    #[tokio::test]
    async fn test_refresh_defaults() {
        let h = harness();

        let login = h.service.login(login_as("a@x.com")).await.unwrap();
        let refreshed = h
            .service
            .refresh(&login.address, None, Some("nonce-7"))
            .await
            .unwrap();

        assert_eq!(refreshed.proof.user_signature, "refreshed_placeholder_signature");
        assert_eq!(refreshed.proof.jwt_randomness, "nonce-7");
        assert_eq!(refreshed.proof.user_salt, login.proof.user_salt);

        let latest = h
            .service
            .sessions()
            .find_by_address(&login.address)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id_token.as_deref(), Some("refresh_token"));
    }

    #[tokio::test]
    async fn test_refresh_unknown_address() {
        let h = harness();
        let err = h
            .service
            .refresh(&SuiAddress::random(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ZkLoginError::AddressNotFound));
    }

    #[tokio::test]
    async fn test_session_expires_after_ttl() {
        let h = harness();

        let login = h.service.login(login_as("a@x.com")).await.unwrap();
        assert!(h.service.validate(&login.auth_token).await.is_ok());

        h.clock.advance(Duration::hours(25));

        let err = h.service.validate(&login.auth_token).await.unwrap_err();
        assert!(matches!(err, ZkLoginError::Auth(AuthFailure::NoActiveSession)));
        assert!(
            h.service
                .sessions()
                .find_active_valid(&login.address)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_refresh_after_expiry_restores_access() {
        let h = harness();

        let login = h.service.login(login_as("a@x.com")).await.unwrap();
        h.clock.advance(Duration::hours(30));

        let refreshed = h
            .service
            .refresh(&login.address, None, None)
            .await
            .unwrap();
        assert!(h.service.validate(&refreshed.auth_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_at_most_one_valid_session() {
        let h = harness();

        let login = h.service.login(login_as("a@x.com")).await.unwrap();
        let address = login.address.clone();
        assert_eq!(valid_count(&h, &address).await, 1);

        h.service.login(login_as("A@x.com")).await.unwrap();
        assert_eq!(valid_count(&h, &address).await, 1);

        h.service.refresh(&address, None, None).await.unwrap();
        assert_eq!(valid_count(&h, &address).await, 1);

        h.clock.advance(Duration::hours(1));
        h.service
            .initialize_direct(Some("a@x.com"), None)
            .await
            .unwrap();
        assert_eq!(valid_count(&h, &address).await, 1);

        h.service.refresh(&address, None, None).await.unwrap();
        let sessions = h.repo.sessions_for(&address).await;
        assert_eq!(sessions.len(), 5);
        assert_eq!(
            sessions
                .iter()
                .filter(|s| s.status == SessionStatus::Active)
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_sweep_marks_but_keeps_rows() {
        let h = harness();

        let login = h.service.login(login_as("a@x.com")).await.unwrap();
        h.clock.advance(Duration::hours(24));

        let swept = h.service.sessions().sweep_expired().await.unwrap();
        assert_eq!(swept, 1);

        let sessions = h.repo.sessions_for(&login.address).await;
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].status, SessionStatus::Expired);

        assert_eq!(h.service.sessions().sweep_expired().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_expire_all_active_counts() {
        let h = harness();

        let login = h.service.login(login_as("a@x.com")).await.unwrap();
        let store = h.service.sessions();

        assert_eq!(store.expire_all_active(&login.address).await.unwrap(), 1);
        assert_eq!(store.expire_all_active(&login.address).await.unwrap(), 0);
        assert!(store.find_active_valid(&login.address).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_direct_initialization() {
        let h = harness();

        let issued = h
            .service
            .initialize_direct(Some("Direct@X.com"), None)
            .await
            .unwrap();
        assert_eq!(issued.email.as_ref().unwrap().as_str(), "direct@x.com");
        assert_eq!(issued.proof.user_signature, "direct_login_signature");

        let stored = h
            .service
            .sessions()
            .find_by_address(&issued.address)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id_token.as_deref(), Some("direct_login"));
        assert!(h.service.validate(&issued.auth_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_session_rejects_second_active() {
        let h = harness();
        let identity = AddressIdentity::anonymous();
        let store = h.service.sessions();

        let first = store
            .create_session(
                &identity.address,
                None,
                proof_for(&identity, SessionOrigin::Login),
                Duration::hours(24),
            )
            .await
            .unwrap();
        assert_eq!(first.status, SessionStatus::Active);
        assert_eq!(first.expires_at, first.created_at + Duration::hours(24));

        let err = store
            .create_session(
                &identity.address,
                None,
                proof_for(&identity, SessionOrigin::Login),
                Duration::hours(24),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ZkLoginError::Conflict));
        assert_eq!(h.repo.sessions_for(&identity.address).await.len(), 1);
    }

    #[tokio::test]
    async fn test_replace_active_supersedes_concurrent_session() {
        let inner = Repo::new();
        let clock = Arc::new(ManualClock::starting_now());
        let identity = AddressIdentity::anonymous();

        let competitor = ZkSession::new(
            identity.address.clone(),
            None,
            proof_for(&identity, SessionOrigin::Refresh),
            Duration::hours(24),
            clock.now(),
        );
        let store = SessionStore::new(
            Arc::new(RacingSessions {
                inner: inner.clone(),
                competitor: Mutex::new(Some(competitor.clone())),
            }),
            clock,
        );

        let ours = store
            .replace_active(
                &identity.address,
                None,
                proof_for(&identity, SessionOrigin::Login),
                Duration::hours(24),
            )
            .await
            .unwrap();

        let sessions = inner.sessions_for(&identity.address).await;
        assert_eq!(sessions.len(), 2);
        let stored_competitor = sessions
            .iter()
            .find(|s| s.session_id == competitor.session_id)
            .unwrap();
        assert_eq!(stored_competitor.status, SessionStatus::Expired);

        let active = store
            .find_active_valid(&identity.address)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.session_id, ours.session_id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_refreshes_leave_one_active() {
        let h = harness();
        let login = h.service.login(login_as("busy@x.com")).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = Arc::clone(&h.service);
            let address = login.address.clone();
            handles.push(tokio::spawn(async move {
                service.refresh(&address, None, None).await
            }));
        }

        let mut issued = Vec::new();
        for handle in handles {
            issued.push(handle.await.unwrap().unwrap());
        }

        let sessions = h.repo.sessions_for(&login.address).await;
        assert_eq!(sessions.len(), 9);
        let active: Vec<_> = sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Active)
            .collect();
        assert_eq!(active.len(), 1);
        assert!(issued.iter().any(|i| i.session_id == active[0].session_id));
        assert_eq!(valid_count(&h, &login.address).await, 1);
    }
}

#[cfg(test)]
mod validate_tests {
    use super::support::*;
    use crate::domain::value_object::{
        auth_token::issue_token, email::Email, sui_address::SuiAddress,
    };
    use crate::error::{AuthFailure, ZkLoginError};

    fn failure(err: ZkLoginError) -> AuthFailure {
        err.auth_failure().expect("auth failure")
    }

    #[tokio::test]
    async fn test_valid_token_resolves_identity() {
        let h = harness();
        let login = h.service.login(login_as("a@x.com")).await.unwrap();

        let identity = h.service.validate(&login.auth_token).await.unwrap();
        assert_eq!(identity.address, login.address);
        assert_eq!(identity.email.unwrap().as_str(), "a@x.com");
        assert_eq!(identity.proof, login.proof);
        assert_eq!(identity.expires_at, login.expires_at);
    }

    #[tokio::test]
    async fn test_email_mismatch() {
        let h = harness();
        let a = h.service.login(login_as("a@x.com")).await.unwrap();
        h.service.login(login_as("b@x.com")).await.unwrap();

        let forged = issue_token(Some(&Email::new("b@x.com").unwrap()), &a.address, None).unwrap();
        let err = h.service.validate(&forged).await.unwrap_err();
        assert_eq!(failure(err), AuthFailure::EmailMismatch);
    }

    #[tokio::test]
    async fn test_unknown_address() {
        let h = harness();
        let token = issue_token(
            Some(&Email::new("a@x.com").unwrap()),
            &SuiAddress::random(),
            None,
        )
        .unwrap();
        let err = h.service.validate(&token).await.unwrap_err();
        assert_eq!(failure(err), AuthFailure::AddressNotFound);
    }

    #[tokio::test]
    async fn test_anonymous_login_token_never_validates() {
        let h = harness();
        let issued = h
            .service
            .login(crate::application::identity_session::LoginInput::default())
            .await
            .unwrap();
        assert!(issued.email.is_none());

        let err = h.service.validate(&issued.auth_token).await.unwrap_err();
        assert_eq!(failure(err), AuthFailure::AddressNotFound);
    }

    #[tokio::test]
    async fn test_malformed_tokens() {
        let h = harness();
        for token in ["", "not-base64!!", "bm90IGpzb24="] {
            let err = h.service.validate(token).await.unwrap_err();
            assert_eq!(failure(err), AuthFailure::MalformedToken);
        }
    }

    #[tokio::test]
    async fn test_token_without_session_id_uses_active_session() {
        let h = harness();
        let login = h.service.login(login_as("a@x.com")).await.unwrap();

        let legacy = issue_token(Some(&Email::new("a@x.com").unwrap()), &login.address, None).unwrap();
        assert!(h.service.validate(&legacy).await.is_ok());

        h.service.refresh(&login.address, None, None).await.unwrap();
        assert!(h.service.validate(&legacy).await.is_ok());
    }

    #[tokio::test]
    async fn test_token_email_must_match_exactly() {
        let h = harness();
        let login = h.service.login(login_as("a@x.com")).await.unwrap();

        for email in ["A@X.COM", " a@x.com", "a@x.com "] {
            let json = format!(
                r#"{{"email":"{}","address":"{}","sid":"{}"}}"#,
                email, login.address, login.session_id
            );
            let token = platform::crypto::to_base64(json.as_bytes());
            let err = h.service.validate(&token).await.unwrap_err();
            assert_eq!(failure(err), AuthFailure::EmailMismatch);
        }

        let json = format!(
            r#"{{"email":null,"address":"{}","sid":"{}"}}"#,
            login.address, login.session_id
        );
        let token = platform::crypto::to_base64(json.as_bytes());
        let err = h.service.validate(&token).await.unwrap_err();
        assert_eq!(failure(err), AuthFailure::EmailMismatch);
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::{Extension, Json, Router, middleware};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::application::identity_session::ResolvedIdentity;
    use crate::presentation::middleware::{SessionAuthGuard, check_sui_token, require_sui_token};
    use crate::presentation::router::zklogin_router;

    async fn whoami(Extension(identity): Extension<ResolvedIdentity>) -> Json<Value> {
        Json(json!({ "address": identity.address.to_string() }))
    }

    async fn maybe(identity: Option<Extension<ResolvedIdentity>>) -> Json<Value> {
        let address = identity.map(|Extension(identity)| identity.address.to_string());
        Json(json!({ "address": address }))
    }

    fn app(h: &Harness) -> Router {
        let guard = SessionAuthGuard::new(Arc::clone(&h.service));

        let protected = Router::new()
            .route("/whoami", get(whoami))
            .route_layer(middleware::from_fn_with_state(
                guard.clone(),
                require_sui_token::<Repo, Repo>,
            ));
        let public = Router::new()
            .route("/maybe", get(maybe))
            .route_layer(middleware::from_fn_with_state(
                guard,
                check_sui_token::<Repo, Repo>,
            ));

        zklogin_router(Arc::clone(&h.service))
            .merge(protected)
            .merge(public)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_with_token(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(token) = token {
            builder = builder.header("x-sui-token", token);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn login(app: &Router, email: &str) -> Value {
        let (status, body) = send(
            app,
            post("/zklogin", json!({ "idToken": "jwt", "email": email })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    #[tokio::test]
    async fn test_login_response_shape() {
        let h = harness();
        let app = app(&h);

        let body = login(&app, "User@X.com").await;
        assert_eq!(body["success"], true);
        assert_eq!(
            body["address"],
            format!("0x{}", platform::crypto::sha256_hex(b"user@x.com"))
        );
        assert_eq!(body["zkProof"]["maxEpoch"], "5");
        assert_eq!(body["zkProof"]["inputs"], json!({}));
        assert!(body["authToken"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_login_requires_id_token() {
        let h = harness();
        let app = app(&h);

        let (status, body) = send(&app, post("/zklogin", json!({ "email": "a@x.com" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_login_with_provider_user_id() {
        let h = harness();
        let app = app(&h);

        let (status, body) = send(
            &app,
            post("/zklogin", json!({ "idToken": "jwt", "googleUserId": "1234" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["address"],
            format!(
                "0x{}",
                platform::crypto::sha256_hex(b"google-1234@example.com")
            )
        );
    }

    #[tokio::test]
    async fn test_required_guard() {
        let h = harness();
        let app = app(&h);
        let body = login(&app, "a@x.com").await;
        let token = body["authToken"].as_str().unwrap();

        let (status, whoami) = send(&app, get_with_token("/whoami", Some(token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(whoami["address"], body["address"]);

        let (status, err) = send(&app, get_with_token("/whoami", None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(err["detail"], "No Sui token provided");

        let (status, err) = send(&app, get_with_token("/whoami", Some("garbage"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(err["detail"], "Invalid Sui token");
    }

    #[tokio::test]
    async fn test_required_guard_rejects_refreshed_out_token() {
        let h = harness();
        let app = app(&h);
        let body = login(&app, "a@x.com").await;
        let old_token = body["authToken"].as_str().unwrap().to_string();

        let (status, refreshed) = send(
            &app,
            post(
                "/zklogin/refresh",
                json!({ "suiAddress": body["address"] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(refreshed["zkProof"]["userSignature"], "refreshed_placeholder_signature");

        let (status, _) = send(&app, get_with_token("/whoami", Some(&old_token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let new_token = refreshed["authToken"].as_str().unwrap();
        let (status, _) = send(&app, get_with_token("/whoami", Some(new_token))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_optional_guard() {
        let h = harness();
        let app = app(&h);
        let body = login(&app, "a@x.com").await;
        let token = body["authToken"].as_str().unwrap();

        let (status, anon) = send(&app, get_with_token("/maybe", Some("garbage"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(anon["address"], Value::Null);

        let (status, known) = send(&app, get_with_token("/maybe", Some(token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(known["address"], body["address"]);
    }

    #[tokio::test]
    async fn test_refresh_errors() {
        let h = harness();
        let app = app(&h);

        let (status, _) = send(&app, post("/zklogin/refresh", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            post("/zklogin/refresh", json!({ "suiAddress": "0x1234" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Address not found in the system");

        let unknown = crate::domain::value_object::sui_address::SuiAddress::random();
        let (status, body) = send(
            &app,
            post(
                "/zklogin/refresh",
                json!({ "suiAddress": unknown.to_string() }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_config_endpoint() {
        let h = harness();
        let app = app(&h);

        let (status, body) = send(&app, get_with_token("/zklogin/config", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["config"]["maxEpoch"], "5");
        assert_eq!(body["config"]["jwtIssuer"], "https://accounts.google.com");
        assert_eq!(body["config"]["networkEnv"], "testnet");
    }

    #[tokio::test]
    async fn test_initialize_direct_without_email() {
        let h = harness();
        let app = app(&h);

        let (status, body) = send(&app, post("/zklogin/initialize-direct", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["zkProof"]["userSignature"], "direct_login_signature");

        let token = body["authToken"].as_str().unwrap();
        let (status, whoami) = send(&app, get_with_token("/whoami", Some(token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(whoami["address"], body["suiAddress"]);
        assert_eq!(h.repo.address_count().await, 1);
    }

    #[tokio::test]
    async fn test_session_status_endpoint() {
        let h = harness();
        let app = app(&h);

        let (_, anon) = send(&app, get_with_token("/zklogin/session", None)).await;
        assert_eq!(anon["authenticated"], false);

        let body = login(&app, "a@x.com").await;
        let token = body["authToken"].as_str().unwrap();
        let (_, status) = send(&app, get_with_token("/zklogin/session", Some(token))).await;
        assert_eq!(status["authenticated"], true);
        assert_eq!(status["email"], "a@x.com");
        assert_eq!(status["address"], body["address"]);
    }
}
