//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing for login passwords and tracking PINs.
//! - [`jwt`] -- JWT access-token generation, validation, and refresh-token helpers.

pub mod jwt;
pub mod password;
