//! Handlers for the `/documents` resource.
//!
//! Reads are open. Writes require the `admin` or `editor` role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clientele_core::error::CoreError;
use clientele_core::records::{validate_char_field, validate_optional_char_field};
use clientele_core::types::DbId;
use clientele_db::models::document::{CreateDocument, Document, UpdateDocument};
use clientele_db::repositories::{CustomerRepo, DocumentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireDocumentWriter;
use crate::query::{DocumentListParams, PaginationParams};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Document",
        id,
    })
}

/// GET /api/v1/documents
///
/// `?customer=<id>` restricts the list to one customer's documents.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<DocumentListParams>,
) -> AppResult<Json<Vec<Document>>> {
    let documents = match params.customer {
        Some(customer_id) => DocumentRepo::list_by_customer(&state.pool, customer_id).await?,
        None => {
            let (limit, offset) = PaginationParams {
                limit: params.limit,
                offset: params.offset,
            }
            .resolve();
            DocumentRepo::list(&state.pool, limit, offset).await?
        }
    };
    Ok(Json(documents))
}

/// GET /api/v1/documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Document>> {
    let document = DocumentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(document))
}

/// POST /api/v1/documents
pub async fn create(
    RequireDocumentWriter(writer): RequireDocumentWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateDocument>,
) -> AppResult<(StatusCode, Json<Document>)> {
    validate_char_field("doc_number", &input.doc_number)?;
    CustomerRepo::find_by_id(&state.pool, input.customer)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id: input.customer,
        }))?;

    let document = DocumentRepo::create(&state.pool, &input).await?;
    tracing::info!(
        document_id = document.id,
        customer_id = document.customer_id,
        user_id = writer.user_id,
        "Document created",
    );
    Ok((StatusCode::CREATED, Json(document)))
}

/// PUT|PATCH /api/v1/documents/{id}
///
/// The owning customer cannot be changed.
pub async fn update(
    RequireDocumentWriter(_writer): RequireDocumentWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDocument>,
) -> AppResult<Json<Document>> {
    validate_optional_char_field("doc_number", input.doc_number.as_deref())?;
    let document = DocumentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(document))
}

/// DELETE /api/v1/documents/{id}
pub async fn delete(
    RequireDocumentWriter(writer): RequireDocumentWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if DocumentRepo::delete(&state.pool, id).await? {
        tracing::info!(document_id = id, user_id = writer.user_id, "Document removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
