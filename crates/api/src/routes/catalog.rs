//! Route definitions for the reference catalogs.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/brands`.
///
/// ```text
/// GET    /        -> list_brands (?include_inactive)
/// POST   /        -> create_brand (admin)
/// POST   /quick   -> quick_add_brand
/// PUT    /{id}    -> update_brand (admin)
/// DELETE /{id}    -> delete_brand (admin)
/// ```
pub fn brands_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_brands).post(catalog::create_brand))
        .route("/quick", post(catalog::quick_add_brand))
        .route(
            "/{id}",
            put(catalog::update_brand).delete(catalog::delete_brand),
        )
}

/// Routes mounted at `/item-types`.
pub fn item_types_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(catalog::list_item_types).post(catalog::create_item_type),
        )
        .route(
            "/{id}",
            put(catalog::update_item_type).delete(catalog::delete_item_type),
        )
}

/// Routes mounted at `/repair-categories`.
pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/{id}",
            put(catalog::update_category).delete(catalog::delete_category),
        )
}

/// Routes mounted at `/repair-items` (`GET` accepts `?category_id=`).
pub fn items_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_items).post(catalog::create_item))
        .route(
            "/{id}",
            put(catalog::update_item).delete(catalog::delete_item),
        )
}
