//! Entity Module

pub mod address_record;
pub mod zk_session;
