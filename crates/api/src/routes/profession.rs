//! Route definitions for the `/professions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::profession;
use crate::state::AppState;

/// Routes mounted at `/professions`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profession::list).post(profession::create))
        .route(
            "/{id}",
            get(profession::get_by_id)
                .put(profession::update)
                .patch(profession::update)
                .delete(profession::delete),
        )
}
