//! Per-resource permission extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects callers whose role does not
//! meet the resource's policy with 403. Missing or bad tokens are 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use clientele_core::error::CoreError;
use clientele_core::roles::{can_write_documents, ROLE_ADMIN};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Guards every profession endpoint.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires a role allowed to modify documents (`admin` or `editor`).
/// Document reads need no extractor.
pub struct RequireDocumentWriter(pub AuthUser);

impl FromRequestParts<AppState> for RequireDocumentWriter {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_write_documents(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "You do not have permission to modify documents".into(),
            )));
        }
        Ok(RequireDocumentWriter(user))
    }
}
