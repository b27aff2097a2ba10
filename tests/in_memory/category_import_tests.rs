//! In-memory integration tests for the spreadsheet category import.

use super::helpers::{Backend, backend, category_workbook};
use rstest::rstest;
use taskdeck::category::{
    domain::Category,
    ports::CategoryRepository,
    services::{CreateCategoryRequest, ImportError},
};

fn described(categories: &[Category]) -> Vec<(String, Option<String>, bool)> {
    categories
        .iter()
        .map(|item| {
            (
                item.name().as_str().to_owned(),
                item.code().map(str::to_owned),
                item.is_active(),
            )
        })
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workbook_rows_are_normalized_and_deduplicated(backend: Backend) {
    let document = category_workbook(&[
        ["Drinks", "D1", "true"],
        ["drinks", "D2", "false"],
        ["", "X", "true"],
        ["Snacks", "S1", ""],
    ])
    .expect("workbook should build");

    let summary = backend
        .import
        .import_document(&document)
        .await
        .expect("import should succeed");

    assert_eq!(summary.inserted(), 2);
    let stored = backend.catalog.list().await.expect("listing succeeds");
    assert_eq!(
        described(&stored),
        vec![
            ("Drinks".to_owned(), Some("D1".to_owned()), true),
            ("Snacks".to_owned(), Some("S1".to_owned()), true),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn existing_names_block_any_case_variant(backend: Backend) {
    backend
        .catalog
        .create(CreateCategoryRequest::new("Drinks"))
        .await
        .expect("category created");
    let document = category_workbook(&[["DRINKS", "DR", "false"]]).expect("workbook should build");

    let summary = backend
        .import
        .import_document(&document)
        .await
        .expect("import should succeed");

    assert_eq!(summary.inserted(), 0);
    assert_eq!(
        backend.categories.folded_names().await.expect("names read").len(),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reimporting_the_same_payload_is_idempotent(backend: Backend) {
    let document = category_workbook(&[
        ["Garden", "G", "true"],
        ["Tools", "T", "FALSE"],
        ["garden", "G2", ""],
    ])
    .expect("workbook should build");

    let first = backend
        .import
        .import_document(&document)
        .await
        .expect("first import should succeed");
    let second = backend
        .import
        .import_document(&document)
        .await
        .expect("second import should succeed");

    assert_eq!(first.inserted(), 2);
    assert_eq!(second.inserted(), 0);
    let stored = backend.catalog.list().await.expect("listing succeeds");
    assert_eq!(
        described(&stored),
        vec![
            ("Garden".to_owned(), Some("G".to_owned()), true),
            ("Tools".to_owned(), Some("T".to_owned()), false),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manually_created_categories_survive_reimport(backend: Backend) {
    backend
        .catalog
        .create(CreateCategoryRequest::new("Errands"))
        .await
        .expect("category created");
    let document = category_workbook(&[["errands", "", "maybe"], ["Chores", " C ", " true "]])
        .expect("workbook should build");

    let summary = backend
        .import
        .import_document(&document)
        .await
        .expect("import should succeed");

    assert_eq!(summary.inserted(), 1);
    let stored = backend.catalog.list().await.expect("listing succeeds");
    assert_eq!(
        described(&stored),
        vec![
            ("Chores".to_owned(), Some("C".to_owned()), true),
            ("Errands".to_owned(), None, true),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn header_only_workbook_imports_nothing(backend: Backend) {
    let document = category_workbook(&[]).expect("workbook should build");

    let summary = backend
        .import
        .import_document(&document)
        .await
        .expect("import should succeed");

    assert_eq!(summary.inserted(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_spreadsheet_bytes_are_malformed(backend: Backend) {
    let result = backend
        .import
        .import_document(b"name,code,active\nDrinks,D1,true\n")
        .await;

    assert!(matches!(result, Err(ImportError::MalformedDocument(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_stream_is_rejected(backend: Backend) {
    let empty: &[u8] = &[];
    let result = backend.import.import_stream(empty).await;

    assert!(matches!(result, Err(ImportError::EmptyUpload)));
}
