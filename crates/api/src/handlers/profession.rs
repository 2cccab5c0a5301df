//! Handlers for the `/professions` resource. Admin only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clientele_core::error::CoreError;
use clientele_core::records::{validate_char_field, validate_optional_char_field};
use clientele_core::types::DbId;
use clientele_db::models::profession::{CreateProfession, Profession, UpdateProfession};
use clientele_db::repositories::ProfessionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Profession",
        id,
    })
}

/// GET /api/v1/professions
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Profession>>> {
    let (limit, offset) = params.resolve();
    let professions = ProfessionRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(professions))
}

/// GET /api/v1/professions/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Profession>> {
    let profession = ProfessionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(profession))
}

/// POST /api/v1/professions
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProfession>,
) -> AppResult<(StatusCode, Json<Profession>)> {
    validate_char_field("description", &input.description)?;
    let profession = ProfessionRepo::create(&state.pool, &input).await?;
    tracing::info!(
        profession_id = profession.id,
        user_id = admin.user_id,
        "Profession created",
    );
    Ok((StatusCode::CREATED, Json(profession)))
}

/// PUT|PATCH /api/v1/professions/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProfession>,
) -> AppResult<Json<Profession>> {
    validate_optional_char_field("description", input.description.as_deref())?;
    let profession = ProfessionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(profession))
}

/// DELETE /api/v1/professions/{id}
///
/// Links from customers are removed with the profession.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProfessionRepo::delete(&state.pool, id).await? {
        tracing::info!(profession_id = id, user_id = admin.user_id, "Profession removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
