//! Pipeline domain types

use serde::{Deserialize, Serialize};

use super::task::{Task, decode_tasks};
use crate::ordered_map::OrderedMap;

/// Pipeline as reported by the deployment API
///
/// `id` is assigned by the backend and never changes. `tasks` is in
/// execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Free-form lifecycle tag (e.g. "running", "stopped")
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub labels: OrderedMap<String, String>,
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Task members may arrive PascalCase; they are normalized on decode.
    #[serde(default, deserialize_with = "decode_tasks")]
    pub tasks: Vec<Task>,
    pub repo_watched: Option<String>,
    pub branch_watched: Option<String>,
    #[serde(default)]
    pub auto_run: bool,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub scheduled_at: Option<i64>,
    pub executed_at: Option<i64>,
    pub stopped_at: Option<i64>,
}

impl Pipeline {
    /// Find a task of this pipeline by id
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_pipeline_decodes() {
        let pipeline: Pipeline = serde_json::from_value(json!({"id": "p1", "tasks": []})).unwrap();
        assert_eq!(
            pipeline,
            Pipeline {
                id: "p1".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_tasks_keep_execution_order() {
        let pipeline: Pipeline = serde_json::from_value(json!({
            "id": "p2",
            "name": "release",
            "status": "running",
            "labels": {"team": "core", "env": "prod"},
            "createdAt": 1700000000,
            "tasks": [
                {"id": "build", "type": "build", "config": {"imageName": "api"}},
                {"id": "deploy", "type": "deploy", "upstreamTaskId": "build",
                 "config": {"imageName": "api", "serviceName": "api"}}
            ]
        }))
        .unwrap();

        let ids: Vec<_> = pipeline.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["build", "deploy"]);
        assert_eq!(pipeline.created_at, Some(1_700_000_000));
        assert_eq!(pipeline.labels.keys().next().map(String::as_str), Some("team"));
        assert!(pipeline.task("deploy").is_some());
        assert!(pipeline.task("missing").is_none());
    }

    #[test]
    fn test_pascal_case_tasks_are_normalized() {
        let pipeline: Pipeline = serde_json::from_value(json!({
            "id": "p3",
            "tasks": [{
                "Id": "deploy",
                "Type": "deploy",
                "UpstreamTaskId": "build",
                "Config": {"ImageName": "web", "ServiceName": "web-svc"}
            }]
        }))
        .unwrap();

        let task = pipeline.task("deploy").expect("task");
        assert_eq!(task.upstream_task_id.as_deref(), Some("build"));
        assert_eq!(task.deploy_config().unwrap().service_name, "web-svc");
    }

    #[test]
    fn test_null_tasks_decode_empty() {
        let pipeline: Pipeline = serde_json::from_value(json!({"id": "p4", "tasks": null})).unwrap();
        assert!(pipeline.tasks.is_empty());
    }

    #[test]
    fn test_odd_task_does_not_fail_pipeline() {
        let pipeline: Pipeline = serde_json::from_value(json!({
            "id": "p5",
            "tasks": [
                {"id": "t1", "type": "test", "config": {}},
                {"id": "t2", "type": "build", "config": null}
            ]
        }))
        .unwrap();

        assert_eq!(pipeline.tasks.len(), 2);
        assert_eq!(pipeline.tasks[0].kind.type_name(), "test");
        assert!(pipeline.tasks[1].build_config().is_some());
    }
}
