//! Presentation Layer
//!
//! HTTP handlers, DTOs and routers. Write routes expect the required
//! session guard in front of them; read routes the optional one.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::LedgerAppState;
pub use router::{protected_routes, public_routes};
