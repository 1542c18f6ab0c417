//! Key Material Value Objects
//!
//! Per-address salt and seed, and per-session ephemeral key pairs.
//! All values are random hex; none of them is derived from the email.
//! Debug output redacts the secret halves.

use std::fmt;

use platform::crypto::random_hex;

/// Per-address user salt (16 random bytes)
#[derive(Clone, PartialEq, Eq)]
pub struct UserSalt(String);

impl UserSalt {
    pub const BYTES: usize = 16;

    pub fn generate() -> Self {
        Self(random_hex(Self::BYTES))
    }

    pub fn from_db(salt: impl Into<String>) -> Self {
        Self(salt.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserSalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserSalt(***)")
    }
}

/// Per-address seed (32 random bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSeed(String);

impl AddressSeed {
    pub const BYTES: usize = 32;

    pub fn generate() -> Self {
        Self(random_hex(Self::BYTES))
    }

    pub fn from_db(seed: impl Into<String>) -> Self {
        Self(seed.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ephemeral key pair issued with every session
#[derive(Clone, PartialEq, Eq)]
pub struct EphemeralKeyPair {
    /// 32 random bytes, hex
    pub public_key: String,
    /// 64 random bytes, hex
    pub private_key: String,
}

impl EphemeralKeyPair {
    pub fn generate() -> Self {
        Self {
            public_key: random_hex(32),
            private_key: random_hex(64),
        }
    }
}

impl fmt::Debug for EphemeralKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EphemeralKeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"***")
            .finish()
    }
}

/// Nonce bound into the proof: caller-supplied or 16 random bytes
pub fn jwt_randomness(caller_nonce: Option<&str>) -> String {
    match caller_nonce.map(str::trim) {
        Some(nonce) if !nonce.is_empty() => nonce.to_string(),
        _ => random_hex(16),
    }
}
