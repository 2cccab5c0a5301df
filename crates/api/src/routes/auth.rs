//! Route definitions for `/api-token-auth`.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/api-token-auth`.
///
/// ```text
/// POST /    -> obtain_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(auth::obtain_token))
}
