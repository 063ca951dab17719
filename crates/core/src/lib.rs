//! Domain logic for the RepairDesk backend.
//!
//! Everything in this crate is free of I/O: the error taxonomy, identifier
//! aliases, role names, the device fingerprint contract, the login gate, repair
//! reference sequencing, and the input rules shared by every handler.

pub mod device_gate;
pub mod error;
pub mod fingerprint;
pub mod repair_ref;
pub mod roles;
pub mod storage;
pub mod types;
pub mod validation;
