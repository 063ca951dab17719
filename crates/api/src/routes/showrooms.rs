//! Route definitions for the `/showrooms` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::showrooms;
use crate::state::AppState;

/// Room for multipart framing around the logo bytes.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Routes mounted at `/showrooms`.
///
/// ```text
/// GET    /                    -> list_showrooms
/// POST   /                    -> create_showroom (admin)
/// GET    /{id}                -> get_showroom
/// PUT    /{id}                -> update_showroom
/// POST   /{id}/toggle-active  -> toggle_active (admin)
/// PUT    /{id}/logo           -> upload_logo (multipart)
/// DELETE /{id}/logo           -> delete_logo
/// ```
pub fn router(max_logo_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(showrooms::list_showrooms).post(showrooms::create_showroom),
        )
        .route(
            "/{id}",
            get(showrooms::get_showroom).put(showrooms::update_showroom),
        )
        .route("/{id}/toggle-active", post(showrooms::toggle_active))
        .route(
            "/{id}/logo",
            put(showrooms::upload_logo)
                .delete(showrooms::delete_logo)
                .layer(DefaultBodyLimit::max(max_logo_bytes + MULTIPART_OVERHEAD)),
        )
}
