//! Route definitions for the `/customers` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::customer;
use crate::state::AppState;

/// Routes mounted at `/customers`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// PATCH  /{id}                -> partial_update
/// DELETE /{id}                -> delete
/// GET    /{id}/deactivate     -> deactivate
/// POST   /{id}/deactivate     -> deactivate
/// GET    /deactivate_all      -> deactivate_all
/// POST   /deactivate_all      -> deactivate_all
/// GET    /activate_all        -> activate_all
/// POST   /activate_all        -> activate_all
/// POST   /change_status       -> change_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(customer::list).post(customer::create))
        .route(
            "/deactivate_all",
            get(customer::deactivate_all).post(customer::deactivate_all),
        )
        .route(
            "/activate_all",
            get(customer::activate_all).post(customer::activate_all),
        )
        .route("/change_status", post(customer::change_status))
        .route(
            "/{id}",
            get(customer::get_by_id)
                .put(customer::update)
                .patch(customer::partial_update)
                .delete(customer::delete),
        )
        .route(
            "/{id}/deactivate",
            get(customer::deactivate).post(customer::deactivate),
        )
}
