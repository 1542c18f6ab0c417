//! Ledger Backend Module
//!
//! Challenge pools, challenge NFTs and balance reads on Sui, reached through
//! the [`LedgerGateway`](domain::gateway::LedgerGateway) trait.
//!
//! - `domain/` - Value types, unit conversion, gateway trait
//! - `application/` - Configuration
//! - `infra/` - Mock and JSON-RPC gateways
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! Write routes act only for the address of the validated session.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{LedgerConfig, LedgerMode};
pub use domain::gateway::LedgerGateway;
pub use error::{LedgerError, LedgerResult};
pub use infra::{LedgerBackend, MockLedger, SuiRpcLedger};
pub use presentation::router::{protected_routes, public_routes};
