//! Sui Address Value Object
//!
//! `0x` followed by 64 lowercase hex chars. Registered addresses are the
//! SHA-256 of the normalized email; anonymous ones are random.

use serde::{Deserialize, Serialize};
use std::fmt;

use platform::crypto::{is_lower_hex, random_hex, sha256_hex};

use super::email::Email;

const ADDRESS_HEX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuiAddress(String);

impl SuiAddress {
    /// Deterministic address for an email
    pub fn derive_from_email(email: &Email) -> Self {
        Self(format!("0x{}", sha256_hex(email.as_str().as_bytes())))
    }

    /// Fresh random address (anonymous identities)
    pub fn random() -> Self {
        Self(format!("0x{}", random_hex(ADDRESS_HEX_LEN / 2)))
    }

    /// Parse client input; hex digits are lowercased first
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let hex = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))?;
        let hex = hex.to_ascii_lowercase();
        if !is_lower_hex(&hex, ADDRESS_HEX_LEN) {
            return None;
        }
        Some(Self(format!("0x{hex}")))
    }

    pub fn from_db(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
