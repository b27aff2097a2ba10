//! In-memory integration tests for task searches.

use super::helpers::{Backend, backend};
use rstest::rstest;
use taskdeck::{
    category::services::CreateCategoryRequest,
    task::{
        domain::TaskSearchParams,
        services::{CreateTaskRequest, TaskQueryError},
    },
};

async fn seed(backend: &Backend) {
    let errands = backend
        .catalog
        .create(CreateCategoryRequest::new("Errands"))
        .await
        .expect("category created");
    for (title, step) in [("Buy bread", 2), ("Buy milk", 1), ("Book dentist", 2)] {
        backend
            .tasks
            .create(
                CreateTaskRequest::new(title)
                    .with_step(step)
                    .with_category(errands.id().value()),
            )
            .await
            .expect("task created");
    }
    backend
        .tasks
        .create(CreateTaskRequest::new("Buy gift").with_step(2))
        .await
        .expect("task created");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_searches_return_identical_pages(backend: Backend) {
    seed(&backend).await;
    let params = TaskSearchParams::new()
        .with_order_by("step")
        .with_page_size(2)
        .with_page(2);

    let first = backend
        .queries
        .search(params.clone())
        .await
        .expect("search succeeds");
    let second = backend.queries.search(params).await.expect("search succeeds");

    assert_eq!(first, second);
    assert_eq!(first.iter().map(|item| item.id).collect::<Vec<_>>(), vec![3, 4]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn advanced_search_combines_text_and_category_name(backend: Backend) {
    seed(&backend).await;
    let params = TaskSearchParams::new()
        .with_text("Buy")
        .with_category_name("errand")
        .with_order_by("title_desc");

    let page = backend
        .queries
        .advanced_search(params)
        .await
        .expect("advanced search succeeds");

    assert_eq!(page.total, 2);
    assert_eq!(
        page.items
            .iter()
            .map(|item| item.summary.title.as_str())
            .collect::<Vec<_>>(),
        vec!["Buy milk", "Buy bread"]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_sort_key_orders_by_id(backend: Backend) {
    seed(&backend).await;
    let results = backend
        .queries
        .search(TaskSearchParams::new().with_order_by("nonsense"))
        .await
        .expect("search succeeds");

    assert_eq!(
        results.iter().map(|item| item.id).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_page_is_rejected_before_storage(backend: Backend) {
    let result = backend
        .queries
        .advanced_search(TaskSearchParams::new().with_page(0))
        .await;

    assert!(matches!(result, Err(TaskQueryError::InvalidArgument(_))));
}
