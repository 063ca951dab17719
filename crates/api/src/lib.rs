//! RepairDesk API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, logo
//! storage) so integration tests, the server binary and the maintenance CLI
//! can all use them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
