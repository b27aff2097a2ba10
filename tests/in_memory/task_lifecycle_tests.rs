//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Backend, backend};
use rstest::rstest;
use taskdeck::{
    category::services::CreateCategoryRequest,
    task::{
        domain::TaskId,
        services::{CreateTaskRequest, TaskLifecycleError, UpdateTaskRequest},
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_appears_with_its_category(backend: Backend) {
    let category = backend
        .catalog
        .create(CreateCategoryRequest::new("Work"))
        .await
        .expect("category created");
    let task = backend
        .tasks
        .create(CreateTaskRequest::new("Ship release").with_category(category.id().value()))
        .await
        .expect("task created");

    let rows = backend
        .queries
        .list_with_category()
        .await
        .expect("listing succeeds");

    assert_eq!(rows.len(), 1);
    let row = rows.first().expect("one row");
    assert_eq!(row.summary.id, task.id().value());
    assert_eq!(row.category_id, category.id().value());
    assert_eq!(row.category_name.as_deref(), Some("Work"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_creation_checks_category_existence(backend: Backend) {
    let result = backend
        .tasks
        .create(CreateTaskRequest::new("Dangling").with_category(7))
        .await;

    assert!(matches!(result, Err(TaskLifecycleError::UnknownCategory(_))));
    assert!(backend.tasks.list_all().await.expect("listing").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_then_remove_round_trip(backend: Backend) {
    let task = backend
        .tasks
        .create(CreateTaskRequest::new("Draft notes"))
        .await
        .expect("task created");

    let updated = backend
        .tasks
        .update(
            task.id(),
            UpdateTaskRequest::new("Final notes")
                .with_completed(true)
                .with_step(4),
        )
        .await
        .expect("update succeeds")
        .expect("task exists");
    assert_eq!(updated.title().as_str(), "Final notes");
    assert!(updated.is_completed());
    assert_eq!(updated.step(), 4);

    assert!(backend.tasks.remove(task.id()).await.expect("removal succeeds"));
    let missing = backend
        .tasks
        .update(task.id(), UpdateTaskRequest::new("Again"))
        .await
        .expect("absence is not an error");
    assert_eq!(missing, None);
    assert!(!backend.tasks.remove(TaskId::new(999)).await.expect("removal succeeds"));
}
