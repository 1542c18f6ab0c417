//! Application Layer
//!
//! Use cases and application services.

pub mod address_registry;
pub mod config;
pub mod identity_session;
pub mod session_store;

// Re-exports
pub use address_registry::AddressRegistry;
pub use config::ZkLoginConfig;
pub use identity_session::{IdentitySessionService, IssuedSession, LoginInput, ResolvedIdentity};
pub use session_store::SessionStore;
