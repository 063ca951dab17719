//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO for changes

pub mod catalog;
pub mod customer;
pub mod dashboard;
pub mod device;
pub mod device_auth;
pub mod identity;
pub mod profile;
pub mod repair;
pub mod session;
pub mod settings;
pub mod showroom;
