//! Address Record Entity
//!
//! Persistent email -> address mapping, plus the per-address key material
//! generated once at registration.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email,
    key_material::{AddressSeed, UserSalt},
    sui_address::SuiAddress,
};

/// Stored address mapping
#[derive(Debug, Clone)]
pub struct AddressRecord {
    /// Normalized email (unique)
    pub email: Email,
    /// Derived address (unique)
    pub address: SuiAddress,
    pub salt: UserSalt,
    pub address_seed: AddressSeed,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl AddressRecord {
    /// Register a new email: address is derived, key material is random
    pub fn new(email: Email, now: DateTime<Utc>) -> Self {
        let address = SuiAddress::derive_from_email(&email);
        Self {
            email,
            address,
            salt: UserSalt::generate(),
            address_seed: AddressSeed::generate(),
            created_at: now,
            last_used_at: now,
        }
    }

    pub fn identity(&self) -> AddressIdentity {
        AddressIdentity {
            email: Some(self.email.clone()),
            address: self.address.clone(),
            salt: self.salt.clone(),
            address_seed: self.address_seed.clone(),
        }
    }
}

/// Result of an address lookup or registration
#[derive(Debug, Clone)]
pub struct AddressIdentity {
    /// `None` for anonymous identities
    pub email: Option<Email>,
    pub address: SuiAddress,
    pub salt: UserSalt,
    pub address_seed: AddressSeed,
}

impl AddressIdentity {
    /// Throwaway identity with a random address. Never stored.
    pub fn anonymous() -> Self {
        Self {
            email: None,
            address: SuiAddress::random(),
            salt: UserSalt::generate(),
            address_seed: AddressSeed::generate(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.email.is_none()
    }
}
