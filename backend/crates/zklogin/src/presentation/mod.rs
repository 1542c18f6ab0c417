//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::ZkLoginAppState;
pub use middleware::{SessionAuthGuard, check_sui_token, require_sui_token};
pub use router::zklogin_router;
