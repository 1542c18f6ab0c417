//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations:
//! - Randomness, SHA-256, hex and base64 helpers
//! - Request header token extraction

pub mod crypto;
pub mod header;
