//! Route definitions for `/device-auth`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::device_auth;
use crate::state::AppState;

/// Routes mounted at `/device-auth`. All require the `admin` role.
///
/// ```text
/// GET    /                    -> list_devices
/// PATCH  /{id}                -> update_device
/// DELETE /{id}                -> delete_device
/// POST   /{id}/approve        -> approve_device
/// POST   /{id}/replace        -> replace_device
/// POST   /{id}/toggle-active  -> toggle_device
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(device_auth::list_devices))
        .route(
            "/{id}",
            patch(device_auth::update_device).delete(device_auth::delete_device),
        )
        .route("/{id}/approve", post(device_auth::approve_device))
        .route("/{id}/replace", post(device_auth::replace_device))
        .route("/{id}/toggle-active", post(device_auth::toggle_device))
}
