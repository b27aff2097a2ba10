//! Shared fixtures for task unit tests.

use crate::category::domain::{CategoryId, CategoryName};
use crate::task::domain::{PersistedTaskData, Task, TaskId, TaskListing, TaskTitle};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Epoch second used as the first timestamp handed out by [`SteppingClock`].
pub const START_SECONDS: i64 = 1_767_225_600;

/// Clock that advances by one second on every reading.
#[derive(Debug)]
pub struct SteppingClock {
    next: AtomicI64,
}

impl SteppingClock {
    pub const fn new() -> Self {
        Self {
            next: AtomicI64::new(START_SECONDS),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let seconds = self.next.fetch_add(1, Ordering::SeqCst);
        DateTime::from_timestamp(seconds, 0).expect("timestamp in range")
    }
}

pub fn at(offset_seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(START_SECONDS + offset_seconds, 0).expect("timestamp in range")
}

/// Builds a stored task with explicit fields.
pub fn task(id: i64, title: &str, step: i32, created_offset: i64) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title: TaskTitle::new(title).expect("valid title"),
        completed: false,
        step,
        created_at: at(created_offset),
        category_id: None,
    })
}

/// Builds a listing, optionally linked to a named category.
pub fn listing(task: Task, category: Option<(i64, &str)>) -> TaskListing {
    match category {
        Some((id, name)) => {
            let mut data = persisted(&task);
            data.category_id = Some(CategoryId::new(id));
            TaskListing::new(
                Task::from_persisted(data),
                Some(CategoryName::new(name).expect("valid name")),
            )
        }
        None => TaskListing::new(task, None),
    }
}

/// Returns a completed copy of the task.
pub fn completed(task: Task) -> Task {
    let mut data = persisted(&task);
    data.completed = true;
    Task::from_persisted(data)
}

fn persisted(task: &Task) -> PersistedTaskData {
    PersistedTaskData {
        id: task.id(),
        title: task.title().clone(),
        completed: task.is_completed(),
        step: task.step(),
        created_at: task.created_at(),
        category_id: task.category_id(),
    }
}

pub fn ids(listings: &[TaskListing]) -> Vec<i64> {
    listings
        .iter()
        .map(|item| item.task.id().value())
        .collect()
}
