//! Value Object Module

pub mod auth_token;
pub mod email;
pub mod key_material;
pub mod sui_address;
