//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the zkLogin identity core and the ledger surface:
//! - Unified error type, error kinds and result aliases
//! - Typed ID wrappers for persisted records
//!
//! Only things whose meaning is identical across crates belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
