pub mod auth;
pub mod customer;
pub mod data_sheet;
pub mod document;
pub mod health;
pub mod profession;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /api-token-auth                       obtain bearer token (public)
///
/// /customers                            list, create (open)
/// /customers/{id}                       get, replace, patch, delete
/// /customers/{id}/deactivate            deactivate one customer
/// /customers/deactivate_all             deactivate filtered customers
/// /customers/activate_all               activate filtered customers
/// /customers/change_status              set active flag on filtered customers
///
/// /professions                          list, create (admin only)
/// /professions/{id}                     get, update, delete
///
/// /data-sheet                           list, create (open)
/// /data-sheet/{id}                      get, update, delete
///
/// /documents                            list (open), create (admin, editor)
/// /documents/{id}                       get (open), update, delete (admin, editor)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/api-token-auth", auth::router())
        .nest("/customers", customer::router())
        .nest("/professions", profession::router())
        .nest("/data-sheet", data_sheet::router())
        .nest("/documents", document::router())
}
