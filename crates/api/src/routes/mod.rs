pub mod auth;
pub mod catalog;
pub mod customers;
pub mod dashboard;
pub mod device_auth;
pub mod health;
pub mod repairs;
pub mod settings;
pub mod showrooms;
pub mod users;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         session profile
/// /account/change-password                         change own password
///
/// /users                                           list, create (manager+)
/// /users/{id}                                      get, update, delete (delete: admin)
/// /users/{id}/toggle-active                        activate / deactivate
///
/// /showrooms                                       list, create (create: admin)
/// /showrooms/{id}                                  get, update
/// /showrooms/{id}/toggle-active                    flip active (admin)
/// /showrooms/{id}/logo                             upload (PUT multipart), remove
///
/// /device-auth                                     list (admin)
/// /device-auth/{id}                                update (PATCH), reject (DELETE)
/// /device-auth/{id}/approve                        approve
/// /device-auth/{id}/replace                        approve, deactivating siblings
/// /device-auth/{id}/toggle-active                  flip active
///
/// /brands                                          list, create
/// /brands/quick                                    quick add (any auth)
/// /brands/{id}                                     update, delete
/// /item-types                                      list, create
/// /item-types/{id}                                 update, delete
/// /repair-categories                               list (with counts), create
/// /repair-categories/{id}                          update, delete
/// /repair-items                                    list, create
/// /repair-items/{id}                               update, delete
///
/// /customers                                       list, create
/// /customers/lookup                                find by phone
/// /customers/{id}                                  get, update, delete
/// /customers/{id}/devices                          customer equipment
///
/// /repairs                                         list
/// /repairs/intake                                  intake (POST)
/// /repairs/{id}/intake-summary                     printable summary
///
/// /settings                                        get, update (update: admin)
/// /dashboard/stats                                 counts (admin)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/account", auth::account_router())
        .nest("/users", users::router())
        .nest("/showrooms", showrooms::router(config.max_logo_bytes))
        .nest("/device-auth", device_auth::router())
        .nest("/brands", catalog::brands_router())
        .nest("/item-types", catalog::item_types_router())
        .nest("/repair-categories", catalog::categories_router())
        .nest("/repair-items", catalog::items_router())
        .nest("/customers", customers::router())
        .nest("/repairs", repairs::router())
        .nest("/settings", settings::router())
        .nest("/dashboard", dashboard::router())
}
