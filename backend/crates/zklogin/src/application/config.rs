//! Application Configuration
//!
//! Configuration for the zkLogin application layer.

use std::time::Duration;

/// zkLogin application configuration
#[derive(Debug, Clone)]
pub struct ZkLoginConfig {
    /// Epoch bound reported with every proof
    pub max_epoch: String,
    /// Expected JWT issuer, reported to clients
    pub jwt_issuer: String,
    /// Sui network name (testnet, devnet, mainnet)
    pub network_env: String,
    /// Session lifetime (24 hours)
    pub session_ttl: Duration,
    /// Header carrying the session token
    pub token_header: String,
    /// Domain used for generated anonymous emails
    pub anonymous_email_domain: String,
}

impl Default for ZkLoginConfig {
    fn default() -> Self {
        Self {
            max_epoch: "5".to_string(),
            jwt_issuer: "https://accounts.google.com".to_string(),
            network_env: "testnet".to_string(),
            session_ttl: Duration::from_secs(24 * 3600), // 24 hours
            token_header: "x-sui-token".to_string(),
            anonymous_email_domain: "example.com".to_string(),
        }
    }
}

impl ZkLoginConfig {
    /// Defaults overridden by `SUI_NETWORK`, `ZKLOGIN_MAX_EPOCH` and
    /// `ZKLOGIN_SESSION_TTL_HOURS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let session_ttl = std::env::var("ZKLOGIN_SESSION_TTL_HOURS")
            .ok()
            .and_then(|hours| hours.parse::<u64>().ok())
            .filter(|hours| *hours > 0)
            .map(|hours| Duration::from_secs(hours * 3600))
            .unwrap_or(defaults.session_ttl);

        Self {
            max_epoch: std::env::var("ZKLOGIN_MAX_EPOCH").unwrap_or(defaults.max_epoch),
            network_env: std::env::var("SUI_NETWORK").unwrap_or(defaults.network_env),
            session_ttl,
            ..defaults
        }
    }

    /// Session TTL as a chrono duration
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl).unwrap_or_else(|_| chrono::Duration::hours(24))
    }

    /// Email handed to identities that arrive without one
    pub fn anonymous_email(&self) -> String {
        format!(
            "anonymous-{}@{}",
            platform::crypto::random_hex(8),
            self.anonymous_email_domain
        )
    }
}
