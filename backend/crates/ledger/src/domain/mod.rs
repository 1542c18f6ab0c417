//! Domain Layer
//!
//! Ledger value types, unit conversion and the gateway trait.

pub mod gateway;
pub mod model;
pub mod units;

// Re-exports
pub use gateway::LedgerGateway;
pub use model::{
    Balance, ChallengeCreated, ChallengeJoined, ChallengeParams, ExerciseRecorded, NftMetadata,
    NftMinted, ObjectId, PoolInfo, WinnerStatus,
};
