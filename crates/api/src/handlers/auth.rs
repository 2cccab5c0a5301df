//! Handler for `/api-token-auth` (bearer token issuance).

use axum::extract::State;
use axum::Json;
use clientele_core::error::CoreError;
use clientele_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /api-token-auth`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Issued token and its lifetime in seconds.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: i64,
}

fn bad_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Unable to log in with provided credentials".into(),
    ))
}

/// POST /api/v1/api-token-auth
///
/// Exchange username and password for a bearer token.
pub async fn obtain_token(
    State(state): State<AppState>,
    Json(input): Json<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(bad_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(username = %input.username, "Rejected token request");
        return Err(bad_credentials());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    tracing::info!(user_id = user.id, role = %user.role, "Issued API token");

    Ok(Json(TokenResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
    }))
}
