//! Repository for the `customers` table and its owned/linked records.
//!
//! Multi-table writes (aggregate create, full replace, delete) run in a
//! single transaction. Bulk activation is one `UPDATE ... RETURNING`.

use std::collections::HashMap;

use clientele_core::listing::{escape_like, CustomerOrdering};
use clientele_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};

use crate::models::customer::{
    CreateCustomer, Customer, CustomerDetail, CustomerFilter, PatchCustomer, ProfessionEntry,
    ReplaceCustomer,
};
use crate::models::data_sheet::DataSheet;
use crate::models::document::Document;
use crate::models::profession::Profession;
use crate::repositories::{data_sheet_repo, document_repo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, active, data_sheet_id, created_at, updated_at";

/// Same columns qualified with the `c` alias used by filtered queries.
const PREFIXED_COLUMNS: &str =
    "c.id, c.name, c.address, c.active, c.data_sheet_id, c.created_at, c.updated_at";

/// WHERE fragment for [`CustomerFilter`]. Binds `$1..=$4` and expects
/// `customers c` joined with `data_sheets ds`. `$4` is the search-term
/// array; a customer is kept only when no term fails to match.
const FILTER_CLAUSE: &str = "c.active = $1 \
     AND ($2::text IS NULL OR c.address ILIKE ('%' || $2 || '%')) \
     AND ($3::text IS NULL OR c.name = $3) \
     AND NOT EXISTS ( \
          SELECT 1 FROM unnest($4::text[]) AS t(term) \
          WHERE NOT (c.name ILIKE (t.term || '%') \
                     OR c.address ILIKE ('%' || t.term || '%') \
                     OR ds.description ILIKE ('%' || t.term || '%')))";

/// Foreign key a profession link trips when its profession does not exist.
pub const PROFESSION_LINK_FK: &str = "fk_customer_professions_profession_id";

/// A profession joined through `customer_professions`, tagged with the customer it belongs to.
#[derive(FromRow)]
struct LinkedProfession {
    customer_id: DbId,
    #[sqlx(flatten)]
    profession: Profession,
}

/// Provides CRUD operations, filtering and bulk activation for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Create a customer together with its data sheet, documents and
    /// profession links, returning the created customer row.
    ///
    /// Profession entries carrying an `id` link the existing row; the rest
    /// are inserted as new professions first. Linking an id with no
    /// profession fails on [`PROFESSION_LINK_FK`] and nothing is kept.
    pub async fn create(pool: &PgPool, input: &CreateCustomer) -> Result<Customer, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let data_sheet_id: DbId = sqlx::query_scalar(
            "INSERT INTO data_sheets (description, historical_data) VALUES ($1, $2) RETURNING id",
        )
        .bind(&input.data_sheet.description)
        .bind(&input.data_sheet.historical_data)
        .fetch_one(&mut *tx)
        .await?;

        let insert_query = format!(
            "INSERT INTO customers (name, address, data_sheet_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let customer = sqlx::query_as::<_, Customer>(&insert_query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(data_sheet_id)
            .fetch_one(&mut *tx)
            .await?;

        for doc in &input.document_set {
            sqlx::query(
                "INSERT INTO documents (doc_type, doc_number, customer_id) VALUES ($1, $2, $3)",
            )
            .bind(doc.doc_type)
            .bind(&doc.doc_number)
            .bind(customer.id)
            .execute(&mut *tx)
            .await?;
        }

        let mut profession_ids = Vec::with_capacity(input.professions.len());
        for entry in &input.professions {
            let id: DbId = match entry {
                ProfessionEntry::Existing(r) => r.id,
                ProfessionEntry::New(p) => {
                    sqlx::query_scalar(
                        "INSERT INTO professions (description, status)
                         VALUES ($1, COALESCE($2, true))
                         RETURNING id",
                    )
                    .bind(&p.description)
                    .bind(p.status)
                    .fetch_one(&mut *tx)
                    .await?
                }
            };
            profession_ids.push(id);
        }
        Self::link_professions(&mut tx, customer.id, &profession_ids).await?;

        tx.commit().await?;
        Ok(customer)
    }

    /// Find a customer row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a customer by ID and load its full aggregate.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CustomerDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(customer) => Ok(Self::hydrate(pool, vec![customer]).await?.pop()),
            None => Ok(None),
        }
    }

    /// List customers matching `filter` in the requested order.
    ///
    /// A `None` limit returns every row past `offset`.
    pub async fn list(
        pool: &PgPool,
        filter: &CustomerFilter,
        ordering: &CustomerOrdering,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {PREFIXED_COLUMNS}
             FROM customers c
             JOIN data_sheets ds ON ds.id = c.data_sheet_id
             WHERE {FILTER_CLAUSE}
             ORDER BY {order}
             LIMIT $5 OFFSET $6",
            order = ordering.as_sql(),
        );
        // Postgres reads `LIMIT NULL` as no limit.
        bind_filter(sqlx::query_as::<_, Customer>(&query), filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Replace a customer's scalar fields, rewrite its data sheet in place and
    /// replace every profession link.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &ReplaceCustomer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE customers SET name = $2, address = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(customer) = sqlx::query_as::<_, Customer>(&update_query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query("UPDATE data_sheets SET description = $2, historical_data = $3 WHERE id = $1")
            .bind(customer.data_sheet_id)
            .bind(&input.data_sheet.description)
            .bind(&input.data_sheet.historical_data)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM customer_professions WHERE customer_id = $1")
            .bind(customer.id)
            .execute(&mut *tx)
            .await?;
        Self::link_professions(&mut tx, customer.id, &input.profession_ids()).await?;

        tx.commit().await?;
        Ok(Some(customer))
    }

    /// Apply a partial update. Only non-`None` fields are written; profession
    /// links are left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn patch(
        pool: &PgPool,
        id: DbId,
        input: &PatchCustomer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE customers SET
                name = COALESCE($2, name),
                address = COALESCE($3, address)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(customer) = sqlx::query_as::<_, Customer>(&update_query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(ref sheet) = input.data_sheet {
            sqlx::query(
                "UPDATE data_sheets SET
                    description = COALESCE($2, description),
                    historical_data = COALESCE($3, historical_data)
                 WHERE id = $1",
            )
            .bind(customer.data_sheet_id)
            .bind(&sheet.description)
            .bind(&sheet.historical_data)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(customer))
    }

    /// Delete a customer and its data sheet. Documents and profession links
    /// go with it by cascade; the professions themselves are kept.
    ///
    /// Returns `true` if a customer was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let data_sheet_id: Option<DbId> =
            sqlx::query_scalar("DELETE FROM customers WHERE id = $1 RETURNING data_sheet_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(data_sheet_id) = data_sheet_id else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM data_sheets WHERE id = $1")
            .bind(data_sheet_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Set the `active` flag on one customer.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_active(
        pool: &PgPool,
        id: DbId,
        active: bool,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("UPDATE customers SET active = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(active)
            .fetch_optional(pool)
            .await
    }

    /// Set the `active` flag on every customer matching `filter` in one
    /// statement. Returns the updated rows, newest first.
    pub async fn set_active_where(
        pool: &PgPool,
        filter: &CustomerFilter,
        active: bool,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers c SET active = $5
             FROM data_sheets ds
             WHERE ds.id = c.data_sheet_id AND {FILTER_CLAUSE}
             RETURNING {PREFIXED_COLUMNS}"
        );
        let mut updated = bind_filter(sqlx::query_as::<_, Customer>(&query), filter)
            .bind(active)
            .fetch_all(pool)
            .await?;
        updated.sort_by(|a, b| b.id.cmp(&a.id));

        tracing::debug!(count = updated.len(), active, "Bulk-updated customer active flag");
        Ok(updated)
    }

    /// Load data sheets, professions and documents for `customers` with one
    /// query per relation, preserving the input order.
    pub async fn hydrate(
        pool: &PgPool,
        customers: Vec<Customer>,
    ) -> Result<Vec<CustomerDetail>, sqlx::Error> {
        if customers.is_empty() {
            return Ok(Vec::new());
        }

        let customer_ids: Vec<DbId> = customers.iter().map(|c| c.id).collect();
        let sheet_ids: Vec<DbId> = customers.iter().map(|c| c.data_sheet_id).collect();

        let sheet_query = format!(
            "SELECT {cols} FROM data_sheets WHERE id = ANY($1)",
            cols = data_sheet_repo::COLUMNS,
        );
        let sheets = sqlx::query_as::<_, DataSheet>(&sheet_query)
            .bind(&sheet_ids)
            .fetch_all(pool)
            .await?;

        let links = sqlx::query_as::<_, LinkedProfession>(
            "SELECT cp.customer_id, p.id, p.description, p.status, p.created_at, p.updated_at
             FROM customer_professions cp
             JOIN professions p ON p.id = cp.profession_id
             WHERE cp.customer_id = ANY($1)
             ORDER BY p.id ASC",
        )
        .bind(&customer_ids)
        .fetch_all(pool)
        .await?;

        let document_query = format!(
            "SELECT {cols} FROM documents WHERE customer_id = ANY($1) ORDER BY id ASC",
            cols = document_repo::COLUMNS,
        );
        let documents = sqlx::query_as::<_, Document>(&document_query)
            .bind(&customer_ids)
            .fetch_all(pool)
            .await?;

        let mut sheets_by_id: HashMap<DbId, DataSheet> =
            sheets.into_iter().map(|s| (s.id, s)).collect();
        let mut professions_by_customer: HashMap<DbId, Vec<Profession>> = HashMap::new();
        for link in links {
            professions_by_customer
                .entry(link.customer_id)
                .or_default()
                .push(link.profession);
        }
        let mut documents_by_customer: HashMap<DbId, Vec<Document>> = HashMap::new();
        for doc in documents {
            documents_by_customer.entry(doc.customer_id).or_default().push(doc);
        }

        customers
            .into_iter()
            .map(|customer| {
                // The unique FK guarantees the sheet exists for every customer.
                let sheet = sheets_by_id
                    .remove(&customer.data_sheet_id)
                    .ok_or(sqlx::Error::RowNotFound)?;
                let professions = professions_by_customer
                    .remove(&customer.id)
                    .unwrap_or_default();
                let docs = documents_by_customer
                    .remove(&customer.id)
                    .unwrap_or_default();
                Ok(CustomerDetail::assemble(customer, sheet, professions, &docs))
            })
            .collect()
    }

    /// Insert junction rows linking `customer_id` to each profession id.
    /// Duplicate ids are ignored.
    async fn link_professions(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        customer_id: DbId,
        profession_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if profession_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO customer_professions (customer_id, profession_id)
             SELECT $1, UNNEST($2::bigint[])
             ON CONFLICT DO NOTHING",
        )
        .bind(customer_id)
        .bind(profession_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

/// Bind the four [`FILTER_CLAUSE`] parameters in order.
fn bind_filter<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    filter: &CustomerFilter,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    query
        .bind(filter.active)
        .bind(filter.address.as_deref().map(escape_like))
        .bind(filter.name.clone())
        .bind(
            filter
                .search
                .iter()
                .map(String::as_str)
                .map(escape_like)
                .collect::<Vec<String>>(),
        )
}
