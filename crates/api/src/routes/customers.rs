//! Route definitions for the `/customers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::customers;
use crate::state::AppState;

/// Routes mounted at `/customers`.
///
/// ```text
/// GET    /              -> list_customers (?showroom_id)
/// POST   /              -> create_customer
/// GET    /lookup        -> lookup_customer (?phone&showroom_id)
/// GET    /{id}          -> get_customer
/// PUT    /{id}          -> update_customer
/// DELETE /{id}          -> delete_customer (manager+)
/// GET    /{id}/devices  -> list_customer_devices
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route("/lookup", get(customers::lookup_customer))
        .route(
            "/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route("/{id}/devices", get(customers::list_customer_devices))
}
