//! Handlers for the `/customers` resource.
//!
//! Every response carries the full customer aggregate (data sheet,
//! professions, document strings). The list endpoint and the bulk actions
//! share one filter built from the query string.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clientele_core::error::CoreError;
use clientele_core::listing::{
    parse_active_filter, parse_status_value, split_search_terms, CustomerOrdering,
};
use clientele_core::records::{validate_char_field, validate_optional_char_field};
use clientele_core::types::DbId;
use clientele_db::models::customer::{
    CreateCustomer, CustomerDetail, CustomerFilter, PatchCustomer, ProfessionEntry,
    ReplaceCustomer,
};
use clientele_db::repositories::customer_repo::PROFESSION_LINK_FK;
use clientele_db::repositories::{CustomerRepo, ProfessionRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::query::CustomerListParams;
use crate::state::AppState;

/// Request body for `POST /customers/change_status`.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    /// `"True"` activates; any other string deactivates.
    pub active: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the row filter from query parameters. Empty strings are ignored.
fn build_filter(params: &CustomerListParams) -> CustomerFilter {
    let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
    CustomerFilter {
        active: parse_active_filter(params.active.as_deref()),
        address: non_empty(&params.address),
        name: non_empty(&params.name),
        search: params
            .search
            .as_deref()
            .map(split_search_terms)
            .unwrap_or_default(),
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Customer",
        id,
    })
}

/// Load the aggregate for a customer that was just written.
async fn load_detail(state: &AppState, id: DbId) -> AppResult<CustomerDetail> {
    CustomerRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Map a write that tripped the profession-link foreign key to 404 naming
/// the first profession id that does not exist. Other errors pass through.
///
/// The check runs against the database's own constraint, so a profession
/// deleted while the write is in flight still yields 404 rather than 409.
async fn profession_link_error(state: &AppState, err: sqlx::Error, ids: &[DbId]) -> AppError {
    let is_link_violation = matches!(
        &err,
        sqlx::Error::Database(db_err) if db_err.constraint() == Some(PROFESSION_LINK_FK)
    );
    if !is_link_violation {
        return err.into();
    }
    match ProfessionRepo::find_missing_ids(&state.pool, ids).await {
        Ok(missing) => match missing.first() {
            Some(&id) => AppError::Core(CoreError::NotFound {
                entity: "Profession",
                id,
            }),
            None => err.into(),
        },
        Err(lookup_err) => lookup_err.into(),
    }
}

fn validate_create(input: &CreateCustomer) -> AppResult<()> {
    validate_char_field("name", &input.name)?;
    validate_char_field("address", &input.address)?;
    validate_char_field("data_sheet.description", &input.data_sheet.description)?;
    for doc in &input.document_set {
        validate_char_field("document_set.doc_number", &doc.doc_number)?;
    }
    for entry in &input.professions {
        if let ProfessionEntry::New(p) = entry {
            validate_char_field("professions.description", &p.description)?;
        }
    }
    Ok(())
}

fn validate_replace(input: &ReplaceCustomer) -> AppResult<()> {
    validate_char_field("name", &input.name)?;
    validate_char_field("address", &input.address)?;
    validate_char_field("data_sheet.description", &input.data_sheet.description)?;
    Ok(())
}

fn validate_patch(input: &PatchCustomer) -> AppResult<()> {
    validate_optional_char_field("name", input.name.as_deref())?;
    validate_optional_char_field("address", input.address.as_deref())?;
    if let Some(ref sheet) = input.data_sheet {
        validate_optional_char_field("data_sheet.description", sheet.description.as_deref())?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/customers
///
/// Filters: `address`, `active`, `name`, `search`. Sorted by `ordering`
/// (default `-id`). Every match is returned unless `limit` or `offset` is
/// given.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> AppResult<Json<Vec<CustomerDetail>>> {
    let ordering = CustomerOrdering::parse(params.ordering.as_deref());
    let (limit, offset) = params.page();
    let filter = build_filter(&params);

    let customers = CustomerRepo::list(&state.pool, &filter, &ordering, limit, offset).await?;
    let details = CustomerRepo::hydrate(&state.pool, customers).await?;
    Ok(Json(details))
}

/// GET /api/v1/customers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CustomerDetail>> {
    Ok(Json(load_detail(&state, id).await?))
}

/// POST /api/v1/customers
///
/// Creates the customer with its nested data sheet, documents and
/// professions in one transaction.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<CustomerDetail>)> {
    validate_create(&input)?;

    let customer = match CustomerRepo::create(&state.pool, &input).await {
        Ok(customer) => customer,
        Err(err) => {
            let ids = input.referenced_profession_ids();
            return Err(profession_link_error(&state, err, &ids).await);
        }
    };
    tracing::info!(customer_id = customer.id, "Customer created");

    let detail = load_detail(&state, customer.id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/v1/customers/{id}
///
/// Replaces name, address and data sheet contents, and replaces every
/// profession link with the supplied list.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReplaceCustomer>,
) -> AppResult<Json<CustomerDetail>> {
    validate_replace(&input)?;

    match CustomerRepo::replace(&state.pool, id, &input).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(not_found(id)),
        Err(err) => {
            let ids = input.profession_ids();
            return Err(profession_link_error(&state, err, &ids).await);
        }
    }
    Ok(Json(load_detail(&state, id).await?))
}

/// PATCH /api/v1/customers/{id}
///
/// Updates only the supplied fields. Profession links are never touched.
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PatchCustomer>,
) -> AppResult<Json<CustomerDetail>> {
    validate_patch(&input)?;

    CustomerRepo::patch(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(load_detail(&state, id).await?))
}

/// DELETE /api/v1/customers/{id}
///
/// Removes the customer, its data sheet and its documents.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CustomerRepo::delete(&state.pool, id).await? {
        tracing::info!(customer_id = id, "Customer removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Activation actions
// ---------------------------------------------------------------------------

/// GET|POST /api/v1/customers/{id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CustomerDetail>> {
    CustomerRepo::set_active(&state.pool, id, false)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(load_detail(&state, id).await?))
}

/// GET|POST /api/v1/customers/deactivate_all
///
/// Deactivates every customer matched by the list filters.
pub async fn deactivate_all(
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> AppResult<Json<Vec<CustomerDetail>>> {
    set_active_for_filter(&state, &params, false).await
}

/// GET|POST /api/v1/customers/activate_all
///
/// Activates every customer matched by the list filters.
pub async fn activate_all(
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> AppResult<Json<Vec<CustomerDetail>>> {
    set_active_for_filter(&state, &params, true).await
}

/// POST /api/v1/customers/change_status
///
/// Body `{"active": "True"}` activates the filtered customers; any other
/// string deactivates them.
pub async fn change_status(
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
    Json(input): Json<ChangeStatusRequest>,
) -> AppResult<Json<Vec<CustomerDetail>>> {
    let active = parse_status_value(&input.active);
    set_active_for_filter(&state, &params, active).await
}

async fn set_active_for_filter(
    state: &AppState,
    params: &CustomerListParams,
    active: bool,
) -> AppResult<Json<Vec<CustomerDetail>>> {
    let filter = build_filter(params);
    let updated = CustomerRepo::set_active_where(&state.pool, &filter, active).await?;
    tracing::info!(count = updated.len(), active, "Customer active flag changed in bulk");

    let details = CustomerRepo::hydrate(&state.pool, updated).await?;
    Ok(Json(details))
}
