//! Infrastructure Layer
//!
//! Database implementations and an in-process store.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryZkLoginRepository;
pub use postgres::PgZkLoginRepository;
