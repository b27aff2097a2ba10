//! Application services for task lifecycle and task queries.

mod lifecycle;
mod query;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
pub use query::{TaskQueryError, TaskQueryResult, TaskQueryService};
