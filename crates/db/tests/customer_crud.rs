//! Repository-level tests for the customer aggregate.
//!
//! - Transactional nested create
//! - Filtered listing and bulk activation
//! - Replace / patch semantics
//! - Delete removing owned rows only
//! - Constraint violations

use assert_matches::assert_matches;
use clientele_core::listing::CustomerOrdering;
use clientele_db::models::customer::{
    CreateCustomer, CustomerFilter, PatchCustomer, ProfessionEntry, ProfessionRef,
    ReplaceCustomer,
};
use clientele_db::models::data_sheet::{CreateDataSheet, UpdateDataSheet};
use clientele_db::models::document::{DocType, NewDocument};
use clientele_db::models::profession::CreateProfession;
use clientele_db::repositories::customer_repo::PROFESSION_LINK_FK;
use clientele_db::repositories::{CustomerRepo, DataSheetRepo, DocumentRepo, ProfessionRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sheet(description: &str) -> CreateDataSheet {
    CreateDataSheet {
        description: description.to_string(),
        historical_data: String::new(),
    }
}

fn new_customer(name: &str, address: &str) -> CreateCustomer {
    CreateCustomer {
        name: name.to_string(),
        address: address.to_string(),
        data_sheet: sheet(&format!("{name} sheet")),
        professions: Vec::new(),
        document_set: Vec::new(),
    }
}

async fn names(pool: &PgPool, filter: &CustomerFilter) -> Vec<String> {
    CustomerRepo::list(pool, filter, &CustomerOrdering::default(), None, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_persists_whole_aggregate(pool: PgPool) {
    let existing = ProfessionRepo::create(
        &pool,
        &CreateProfession {
            description: "Existing".to_string(),
            status: Some(false),
        },
    )
    .await
    .unwrap();

    let mut input = new_customer("Alice", "1 Main St");
    input.professions = vec![
        ProfessionEntry::Existing(ProfessionRef { id: existing.id }),
        ProfessionEntry::New(CreateProfession {
            description: "Engineer".to_string(),
            status: None,
        }),
    ];
    input.document_set = vec![
        NewDocument {
            doc_type: DocType::Passport,
            doc_number: "X1".to_string(),
        },
        NewDocument {
            doc_type: DocType::IdentityCard,
            doc_number: "X2".to_string(),
        },
    ];

    let customer = CustomerRepo::create(&pool, &input).await.unwrap();
    assert!(customer.active);

    let detail = CustomerRepo::find_detail(&pool, customer.id)
        .await
        .unwrap()
        .expect("customer should load");
    assert_eq!(detail.data_sheet.description, "Alice sheet");
    assert_eq!(detail.num_professions, 2);
    assert_eq!(detail.document_set, vec!["X1", "X2"]);
    let engineer = detail
        .professions
        .iter()
        .find(|p| p.description == "Engineer")
        .expect("new profession should be linked");
    assert!(engineer.status);

    let docs = DocumentRepo::list_by_customer(&pool, customer.id).await.unwrap();
    assert_eq!(docs[0].doc_type, DocType::Passport);
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_create_rolls_back(pool: PgPool) {
    let mut input = new_customer("Broken", "Nowhere");
    input.professions = vec![ProfessionEntry::Existing(ProfessionRef { id: 404 })];

    let err = CustomerRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(PROFESSION_LINK_FK)
    );

    let sheets = DataSheetRepo::list(&pool, 100, 0).await.unwrap();
    assert!(sheets.is_empty(), "data sheet insert should be rolled back");
}

#[sqlx::test(migrations = "./migrations")]
async fn filters_and_bulk_activation(pool: PgPool) {
    let a = CustomerRepo::create(&pool, &new_customer("Ann", "North Road"))
        .await
        .unwrap();
    CustomerRepo::create(&pool, &new_customer("Ben", "north lane"))
        .await
        .unwrap();
    CustomerRepo::create(&pool, &new_customer("Cid", "South Road"))
        .await
        .unwrap();

    let north = CustomerFilter {
        address: Some("NORTH".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&pool, &north).await, vec!["Ben", "Ann"]);

    let updated = CustomerRepo::set_active_where(&pool, &north, false)
        .await
        .unwrap();
    let ids: Vec<i64> = updated.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids[0] > ids[1], "bulk result should be newest first");
    assert!(ids.contains(&a.id));

    assert_eq!(names(&pool, &CustomerFilter::default()).await, vec!["Cid"]);
    let inactive = CustomerFilter {
        active: false,
        ..Default::default()
    };
    assert_eq!(names(&pool, &inactive).await, vec!["Ben", "Ann"]);

    let by_sheet = CustomerFilter {
        search: vec!["cid sh".to_string()],
        ..Default::default()
    };
    assert_eq!(names(&pool, &by_sheet).await, vec!["Cid"]);

    // Every term has to match, each against any searchable field.
    let all_terms = CustomerFilter {
        search: vec!["ci".to_string(), "SOUTH".to_string()],
        ..Default::default()
    };
    assert_eq!(names(&pool, &all_terms).await, vec!["Cid"]);
    let one_term_misses = CustomerFilter {
        search: vec!["cid".to_string(), "north".to_string()],
        ..Default::default()
    };
    assert!(names(&pool, &one_term_misses).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn replace_rewrites_sheet_and_links(pool: PgPool) {
    let mut input = new_customer("Dan", "1 Elm");
    input.professions = vec![ProfessionEntry::New(CreateProfession {
        description: "Cook".to_string(),
        status: None,
    })];
    let customer = CustomerRepo::create(&pool, &input).await.unwrap();
    let pilot = ProfessionRepo::create(
        &pool,
        &CreateProfession {
            description: "Pilot".to_string(),
            status: None,
        },
    )
    .await
    .unwrap();

    let replaced = CustomerRepo::replace(
        &pool,
        customer.id,
        &ReplaceCustomer {
            name: "Daniel".to_string(),
            address: "2 Elm".to_string(),
            data_sheet: sheet("rewritten"),
            professions: vec![ProfessionRef { id: pilot.id }],
        },
    )
    .await
    .unwrap()
    .expect("customer should exist");
    assert_eq!(replaced.data_sheet_id, customer.data_sheet_id);

    let detail = CustomerRepo::find_detail(&pool, customer.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.name, "Daniel");
    assert_eq!(detail.data_sheet.description, "rewritten");
    assert_eq!(detail.professions.len(), 1);
    assert_eq!(detail.professions[0].id, pilot.id);

    let missing = CustomerRepo::replace(
        &pool,
        customer.id + 1000,
        &ReplaceCustomer {
            name: "x".to_string(),
            address: "y".to_string(),
            data_sheet: sheet("z"),
            professions: Vec::new(),
        },
    )
    .await
    .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn patch_leaves_unset_fields(pool: PgPool) {
    let customer = CustomerRepo::create(&pool, &new_customer("Eva", "3 Elm"))
        .await
        .unwrap();

    let patched = CustomerRepo::patch(
        &pool,
        customer.id,
        &PatchCustomer {
            name: None,
            address: Some("4 Elm".to_string()),
            data_sheet: Some(UpdateDataSheet {
                description: None,
                historical_data: Some("notes".to_string()),
            }),
        },
    )
    .await
    .unwrap()
    .expect("customer should exist");
    assert_eq!(patched.name, "Eva");
    assert_eq!(patched.address, "4 Elm");

    let sheet = DataSheetRepo::find_by_id(&pool, customer.data_sheet_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sheet.description, "Eva sheet");
    assert_eq!(sheet.historical_data, "notes");
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_removes_owned_rows_only(pool: PgPool) {
    let mut input = new_customer("Fay", "5 Elm");
    input.professions = vec![ProfessionEntry::New(CreateProfession {
        description: "Smith".to_string(),
        status: None,
    })];
    input.document_set = vec![NewDocument {
        doc_type: DocType::Others,
        doc_number: "F-1".to_string(),
    }];
    let customer = CustomerRepo::create(&pool, &input).await.unwrap();

    assert!(CustomerRepo::delete(&pool, customer.id).await.unwrap());
    assert!(!CustomerRepo::delete(&pool, customer.id).await.unwrap());

    assert!(DataSheetRepo::find_by_id(&pool, customer.data_sheet_id)
        .await
        .unwrap()
        .is_none());
    assert!(DocumentRepo::list_by_customer(&pool, customer.id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(ProfessionRepo::list(&pool, 100, 0).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn owned_data_sheet_cannot_be_deleted(pool: PgPool) {
    let customer = CustomerRepo::create(&pool, &new_customer("Gus", "6 Elm"))
        .await
        .unwrap();

    let err = DataSheetRepo::delete(&pool, customer.data_sheet_id)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn find_missing_profession_ids(pool: PgPool) {
    let p = ProfessionRepo::create(
        &pool,
        &CreateProfession {
            description: "Clerk".to_string(),
            status: None,
        },
    )
    .await
    .unwrap();

    let missing = ProfessionRepo::find_missing_ids(&pool, &[p.id, p.id + 7])
        .await
        .unwrap();
    assert_eq!(missing, vec![p.id + 7]);
    assert!(ProfessionRepo::find_missing_ids(&pool, &[])
        .await
        .unwrap()
        .is_empty());
}
