//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::ZkSessionId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    address_record::AddressRecord,
    zk_session::{ProofMaterial, SessionStatus, ZkSession},
};
use crate::domain::repository::{AddressRepository, SessionRepository};
use crate::domain::value_object::{
    email::Email,
    key_material::{AddressSeed, EphemeralKeyPair, UserSalt},
    sui_address::SuiAddress,
};
use crate::error::{ZkLoginError, ZkLoginResult};

const SESSION_COLUMNS: &str = r#"
    session_id,
    address,
    id_token,
    ephemeral_public_key,
    ephemeral_private_key,
    address_seed,
    user_salt,
    max_epoch,
    jwt_randomness,
    user_signature,
    status,
    created_at,
    expires_at
"#;

/// PostgreSQL-backed zkLogin repository
#[derive(Clone)]
pub struct PgZkLoginRepository {
    pool: PgPool,
}

impl PgZkLoginRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ============================================================================
// Address Repository Implementation
// ============================================================================

impl AddressRepository for PgZkLoginRepository {
    async fn insert(&self, record: &AddressRecord) -> ZkLoginResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO sui_addresses (
                email,
                address,
                salt,
                address_seed,
                created_at,
                last_used_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.email.as_str())
        .bind(record.address.as_str())
        .bind(record.salt.as_str())
        .bind(record.address_seed.as_str())
        .bind(record.created_at)
        .bind(record.last_used_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ZkLoginError::Conflict),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &Email) -> ZkLoginResult<Option<AddressRecord>> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT email, address, salt, address_seed, created_at, last_used_at
            FROM sui_addresses
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AddressRow::into_record))
    }

    async fn find_by_address(&self, address: &SuiAddress) -> ZkLoginResult<Option<AddressRecord>> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT email, address, salt, address_seed, created_at, last_used_at
            FROM sui_addresses
            WHERE address = $1
            "#,
        )
        .bind(address.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AddressRow::into_record))
    }

    async fn touch_by_email(
        &self,
        email: &Email,
        at: DateTime<Utc>,
    ) -> ZkLoginResult<Option<AddressRecord>> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            UPDATE sui_addresses
            SET last_used_at = $2
            WHERE email = $1
            RETURNING email, address, salt, address_seed, created_at, last_used_at
            "#,
        )
        .bind(email.as_str())
        .bind(at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AddressRow::into_record))
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgZkLoginRepository {
    async fn create(&self, session: &ZkSession) -> ZkLoginResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO zklogin_sessions (
                session_id,
                address,
                id_token,
                ephemeral_public_key,
                ephemeral_private_key,
                address_seed,
                user_salt,
                max_epoch,
                jwt_randomness,
                user_signature,
                status,
                created_at,
                expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(session.session_id.into_uuid())
        .bind(session.address.as_str())
        .bind(&session.id_token)
        .bind(&session.proof.ephemeral.public_key)
        .bind(&session.proof.ephemeral.private_key)
        .bind(session.proof.address_seed.as_str())
        .bind(session.proof.user_salt.as_str())
        .bind(&session.proof.max_epoch)
        .bind(&session.proof.jwt_randomness)
        .bind(&session.proof.user_signature)
        .bind(session.status.as_str())
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // zklogin_sessions_one_active_per_address
            Err(e) if is_unique_violation(&e) => Err(ZkLoginError::Conflict),
            Err(e) => Err(e.into()),
        }
    }

    async fn expire_all_active(&self, address: &SuiAddress) -> ZkLoginResult<u64> {
        let expired = sqlx::query(
            r#"
            UPDATE zklogin_sessions
            SET status = 'expired'
            WHERE address = $1 AND status = 'active'
            "#,
        )
        .bind(address.as_str())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(expired)
    }

    async fn find_active_valid(
        &self,
        address: &SuiAddress,
        now: DateTime<Utc>,
    ) -> ZkLoginResult<Option<ZkSession>> {
        let sql = format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM zklogin_sessions
            WHERE address = $1 AND status = 'active' AND expires_at > $2
            ORDER BY created_at DESC
            LIMIT 1
            "#
        );

        let row = sqlx::query_as::<_, SessionRow>(&sql)
            .bind(address.as_str())
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;

        row.map(SessionRow::into_session).transpose()
    }

    async fn find_latest(&self, address: &SuiAddress) -> ZkLoginResult<Option<ZkSession>> {
        let sql = format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM zklogin_sessions
            WHERE address = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#
        );

        let row = sqlx::query_as::<_, SessionRow>(&sql)
            .bind(address.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(SessionRow::into_session).transpose()
    }

    async fn mark_expired(&self, now: DateTime<Utc>) -> ZkLoginResult<u64> {
        let swept = sqlx::query(
            r#"
            UPDATE zklogin_sessions
            SET status = 'expired'
            WHERE status = 'active' AND expires_at <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(swept)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AddressRow {
    email: String,
    address: String,
    salt: String,
    address_seed: String,
    created_at: DateTime<Utc>,
    last_used_at: DateTime<Utc>,
}

impl AddressRow {
    fn into_record(self) -> AddressRecord {
        AddressRecord {
            email: Email::from_db(self.email),
            address: SuiAddress::from_db(self.address),
            salt: UserSalt::from_db(self.salt),
            address_seed: AddressSeed::from_db(self.address_seed),
            created_at: self.created_at,
            last_used_at: self.last_used_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    address: String,
    id_token: Option<String>,
    ephemeral_public_key: String,
    ephemeral_private_key: String,
    address_seed: String,
    user_salt: String,
    max_epoch: String,
    jwt_randomness: String,
    user_signature: String,
    status: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> ZkLoginResult<ZkSession> {
        let status = self
            .status
            .parse::<SessionStatus>()
            .map_err(ZkLoginError::Internal)?;

        Ok(ZkSession {
            session_id: ZkSessionId::from_uuid(self.session_id),
            address: SuiAddress::from_db(self.address),
            id_token: self.id_token,
            proof: ProofMaterial {
                ephemeral: EphemeralKeyPair {
                    public_key: self.ephemeral_public_key,
                    private_key: self.ephemeral_private_key,
                },
                address_seed: AddressSeed::from_db(self.address_seed),
                user_salt: UserSalt::from_db(self.user_salt),
                max_epoch: self.max_epoch,
                jwt_randomness: self.jwt_randomness,
                user_signature: self.user_signature,
            },
            status,
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}
