//! Task request DTOs

use serde::Serialize;

use crate::domain::task::TaskKind;

/// Body for updating the configuration of one task
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateInput {
    pub id: String,
    pub pipeline_id: String,
    pub task: TaskConfigUpdate,
}

/// New configuration; `None` leaves the task's config unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskConfigUpdate {
    #[serde(flatten)]
    pub kind: Option<TaskKind>,
}

impl TaskUpdateInput {
    pub fn new(pipeline_id: impl Into<String>, task_id: impl Into<String>, kind: Option<TaskKind>) -> Self {
        Self {
            id: task_id.into(),
            pipeline_id: pipeline_id.into(),
            task: TaskConfigUpdate { kind },
        }
    }
}
