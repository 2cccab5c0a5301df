//! Handlers for the `/data-sheet` resource.
//!
//! A data sheet is normally managed through its customer. Deleting a sheet
//! that a customer still owns is rejected with 409.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clientele_core::error::CoreError;
use clientele_core::records::{validate_char_field, validate_optional_char_field};
use clientele_core::types::DbId;
use clientele_db::models::data_sheet::{CreateDataSheet, DataSheet, UpdateDataSheet};
use clientele_db::repositories::DataSheetRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "DataSheet",
        id,
    })
}

/// GET /api/v1/data-sheet
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<DataSheet>>> {
    let (limit, offset) = params.resolve();
    Ok(Json(DataSheetRepo::list(&state.pool, limit, offset).await?))
}

/// GET /api/v1/data-sheet/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataSheet>> {
    let sheet = DataSheetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(sheet))
}

/// POST /api/v1/data-sheet
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDataSheet>,
) -> AppResult<(StatusCode, Json<DataSheet>)> {
    validate_char_field("description", &input.description)?;
    let sheet = DataSheetRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(sheet)))
}

/// PUT|PATCH /api/v1/data-sheet/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDataSheet>,
) -> AppResult<Json<DataSheet>> {
    validate_optional_char_field("description", input.description.as_deref())?;
    let sheet = DataSheetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(sheet))
}

/// DELETE /api/v1/data-sheet/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DataSheetRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
