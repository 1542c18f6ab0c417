//! Domain Layer
//!
//! Contains entities, value objects, the clock seam and repository traits.

pub mod clock;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::{
    address_record::{AddressIdentity, AddressRecord},
    zk_session::{ProofMaterial, SessionOrigin, SessionStatus, ZkSession},
};
pub use repository::{AddressRepository, SessionRepository};
