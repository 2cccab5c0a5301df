//! Route definitions for the `/data-sheet` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::data_sheet;
use crate::state::AppState;

/// Routes mounted at `/data-sheet`.
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
        .route("/", get(data_sheet::list).post(data_sheet::create))
        .route(
            "/{id}",
            get(data_sheet::get_by_id)
                .put(data_sheet::update)
                .patch(data_sheet::update)
                .delete(data_sheet::delete),
        )
}
