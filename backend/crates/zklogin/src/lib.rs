//! zkLogin Identity Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, clock seam, repository traits
//! - `application/` - Address registry, session store, identity service
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, session guard
//!
//! ## Identity Model
//! - An email maps to exactly one address: `0x` + SHA-256 of the
//!   normalized email
//! - Salt and address seed are random, generated once per address
//! - Every login or refresh issues fresh ephemeral keys and leaves exactly
//!   one active session per address
//! - Session tokens are unsigned; each request re-checks the registry and
//!   the session store

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::ZkLoginConfig;
pub use application::identity_session::{IdentitySessionService, ResolvedIdentity};
pub use error::{AuthFailure, ZkLoginError, ZkLoginResult};
pub use infra::{memory::InMemoryZkLoginRepository, postgres::PgZkLoginRepository};
pub use presentation::router::zklogin_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgZkLoginRepository as ZkLoginStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
