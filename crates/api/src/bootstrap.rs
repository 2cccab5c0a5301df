//! Startup provisioning of the first admin account.

use clientele_core::error::CoreError;
use clientele_core::roles::ROLE_ADMIN;
use clientele_db::models::user::CreateUser;
use clientele_db::repositories::UserRepo;
use clientele_db::DbPool;

use crate::auth::password::{hash_password, MIN_PASSWORD_LEN};
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured admin account unless a user with that name exists.
///
/// Returns `true` when a new account was created.
pub async fn ensure_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<bool> {
    if UserRepo::find_by_username(pool, &admin.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %admin.username, "Bootstrap admin already exists");
        return Ok(false);
    }

    if admin.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Bootstrap admin password must be at least {MIN_PASSWORD_LEN} characters"
        ))));
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(true)
}
