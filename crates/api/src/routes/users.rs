//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                    -> list_users
/// POST   /                    -> create_user
/// GET    /{id}                -> get_user
/// PUT    /{id}                -> update_user
/// DELETE /{id}                -> delete_user (admin)
/// POST   /{id}/toggle-active  -> toggle_active
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/{id}/toggle-active", post(users::toggle_active))
}
