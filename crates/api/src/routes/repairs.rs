//! Route definitions for the `/repairs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::repairs;
use crate::state::AppState;

/// Routes mounted at `/repairs`.
///
/// ```text
/// GET  /                     -> list_repairs (?showroom_id)
/// POST /intake               -> create_intake
/// GET  /{id}/intake-summary  -> intake_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(repairs::list_repairs))
        .route("/intake", post(repairs::create_intake))
        .route("/{id}/intake-summary", get(repairs::intake_summary))
}
