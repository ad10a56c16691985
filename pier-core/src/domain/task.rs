//! Task domain types

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::normalize::transform_camel_case;
use crate::ordered_map::OrderedMap;
use crate::pairs::{from_pairs, to_pairs};

/// A single step of a pipeline
///
/// A task does not point back at its pipeline. Requests that act on a task
/// carry the owning `pipelineId` alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub scheduled_at: Option<i64>,
    pub executed_at: Option<i64>,
    pub stopped_at: Option<i64>,
    /// Task that must finish first, within the same pipeline. Consumed by the
    /// backend; pier neither validates nor follows it.
    pub upstream_task_id: Option<String>,
    pub stream_webhook: Option<String>,
    pub remarks: Option<String>,
    #[serde(default)]
    pub auto_run: bool,
    /// Seconds
    pub timeout: Option<u64>,
    /// Encoded on the wire as the sibling `type` and `config` members.
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    pub fn build_config(&self) -> Option<&BuildConfig> {
        match &self.kind {
            TaskKind::Build(config) => Some(config),
            _ => None,
        }
    }

    pub fn deploy_config(&self) -> Option<&DeployConfig> {
        match &self.kind {
            TaskKind::Deploy(config) => Some(config),
            _ => None,
        }
    }
}

/// Decode a task list, lowercasing the leading capital of each task's keys
///
/// Used for `Pipeline::tasks`; a `null` list decodes as empty.
pub(crate) fn decode_tasks<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    raw.unwrap_or_default()
        .into_iter()
        .map(|task| serde_json::from_value(transform_camel_case(task)).map_err(D::Error::custom))
        .collect()
}

/// What a task does, selected by its `type` discriminator
///
/// On the wire this is the pair `{"type": ..., "config": {...}}`. Config keys
/// may arrive PascalCase and are normalized before decoding. A missing or
/// `null` config decodes as the default config of its type.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    Build(BuildConfig),
    Deploy(DeployConfig),
    /// A `type` pier does not model, or a config that does not fit its
    /// type. Kept verbatim so one odd task does not fail its pipeline.
    Unrecognized { type_name: String, config: Value },
}

impl TaskKind {
    /// Build a kind from the raw `type` and `config` members
    pub fn from_parts(type_name: String, config: Value) -> Self {
        let config = match config {
            Value::Null => Value::Object(Map::new()),
            other => transform_camel_case(other),
        };

        let decoded = match type_name.as_str() {
            "build" => serde_json::from_value(config.clone()).map(TaskKind::Build),
            "deploy" => serde_json::from_value(config.clone()).map(TaskKind::Deploy),
            _ => return TaskKind::Unrecognized { type_name, config },
        };
        decoded.unwrap_or(TaskKind::Unrecognized { type_name, config })
    }

    /// The wire value of the `type` discriminator
    pub fn type_name(&self) -> &str {
        match self {
            TaskKind::Build(_) => "build",
            TaskKind::Deploy(_) => "deploy",
            TaskKind::Unrecognized { type_name, .. } => type_name,
        }
    }

    /// Image reference (`name:tag`) built or deployed by this task
    pub fn image(&self) -> Option<String> {
        let (name, tag) = match self {
            TaskKind::Build(c) => (&c.image_name, &c.image_tag),
            TaskKind::Deploy(c) => (&c.image_name, &c.image_tag),
            TaskKind::Unrecognized { .. } => return None,
        };
        if tag.is_empty() {
            Some(format!("{}:latest", name))
        } else {
            Some(format!("{}:{}", name, tag))
        }
    }
}

impl Serialize for TaskKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", self.type_name())?;
        match self {
            TaskKind::Build(config) => map.serialize_entry("config", config)?,
            TaskKind::Deploy(config) => map.serialize_entry("config", config)?,
            TaskKind::Unrecognized { config, .. } => map.serialize_entry("config", config)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TaskKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Tagged {
            #[serde(rename = "type", default)]
            type_name: String,
            #[serde(default)]
            config: Value,
        }

        let Tagged { type_name, config } = Tagged::deserialize(deserializer)?;
        Ok(TaskKind::from_parts(type_name, config))
    }
}

/// Image build settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildConfig {
    pub image_name: String,
    pub image_tag: String,
    /// Dockerfile path inside the repository
    pub dockerfile: String,
    pub repo_url: String,
    pub repo_name: String,
    pub branch: Option<String>,
    pub build_args: OrderedMap<String, String>,
}

/// Container deployment settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeployConfig {
    pub image_name: String,
    pub image_tag: String,
    pub service_name: String,
    pub restart_policy: Option<String>,
    /// Volume name to container path
    pub volumes: OrderedMap<String, String>,
    /// Host file to container path
    pub mounts: OrderedMap<String, String>,
    /// Host port to container port
    pub ports: OrderedMap<String, String>,
    /// Network name to alias
    pub networks: OrderedMap<String, String>,
    /// `KEY=value` entries
    pub env: Vec<String>,
    pub command: Option<Vec<String>>,
    pub links: Option<Vec<String>>,
    pub auto_remove: bool,
}

impl DeployConfig {
    /// Environment as a map; entries without `=` get an empty value
    pub fn env_map(&self) -> OrderedMap<String, String> {
        from_pairs(Some(self.env.as_slice()))
    }

    /// Replace the environment with the given map
    pub fn with_env(mut self, env: &OrderedMap<String, String>) -> Self {
        self.env = to_pairs(Some(env));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_task_decodes_by_type() {
        let task: Task = serde_json::from_value(json!({
            "id": "t1",
            "name": "build api",
            "type": "build",
            "config": {
                "imageName": "registry.local/api",
                "imageTag": "1.2.0",
                "dockerfile": "Dockerfile",
                "repoUrl": "https://git.local/api.git",
                "repoName": "api",
                "buildArgs": {"RUST_VERSION": "1.85", "PROFILE": "release"}
            }
        }))
        .unwrap();

        let config = task.build_config().expect("build config");
        assert_eq!(config.repo_name, "api");
        let args: Vec<_> = config.build_args.keys().cloned().collect();
        assert_eq!(args, vec!["RUST_VERSION", "PROFILE"]);
        assert!(task.deploy_config().is_none());
        assert_eq!(task.kind.image().as_deref(), Some("registry.local/api:1.2.0"));
    }

    #[test]
    fn test_deploy_task_with_upstream() {
        let task: Task = serde_json::from_value(json!({
            "id": "t2",
            "type": "deploy",
            "upstreamTaskId": "t1",
            "autoRun": true,
            "config": {
                "imageName": "registry.local/api",
                "serviceName": "api",
                "ports": {"8080": "80"},
                "env": ["RUST_LOG=info", "FLAG"]
            }
        }))
        .unwrap();

        assert_eq!(task.upstream_task_id.as_deref(), Some("t1"));
        assert!(task.auto_run);
        let config = task.deploy_config().expect("deploy config");
        assert_eq!(config.ports.get("8080").map(String::as_str), Some("80"));
        assert_eq!(config.env_map().get("FLAG").map(String::as_str), Some(""));
        assert_eq!(task.kind.image().as_deref(), Some("registry.local/api:latest"));
    }

    #[test]
    fn test_pascal_case_config_is_normalized() {
        let task: Task = serde_json::from_value(json!({
            "id": "t5",
            "type": "deploy",
            "config": {"ImageName": "web", "ServiceName": "web", "AutoRemove": true}
        }))
        .unwrap();

        let config = task.deploy_config().unwrap();
        assert_eq!(config.service_name, "web");
        assert!(config.auto_remove);
    }

    #[test]
    fn test_unknown_type_is_kept_verbatim() {
        let task: Task = serde_json::from_value(json!({
            "id": "t3",
            "type": "test",
            "config": {"suite": "unit"}
        }))
        .unwrap();

        assert_eq!(
            task.kind,
            TaskKind::Unrecognized {
                type_name: "test".to_string(),
                config: json!({"suite": "unit"}),
            }
        );
        assert_eq!(task.kind.type_name(), "test");
        assert_eq!(task.kind.image(), None);

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "test");
        assert_eq!(value["config"]["suite"], "unit");
    }

    #[test]
    fn test_null_or_missing_config_uses_defaults() {
        let task: Task =
            serde_json::from_value(json!({"id": "t6", "type": "build", "config": null})).unwrap();
        assert_eq!(task.kind, TaskKind::Build(BuildConfig::default()));

        let task: Task = serde_json::from_value(json!({"id": "t7", "type": "deploy"})).unwrap();
        assert_eq!(task.kind, TaskKind::Deploy(DeployConfig::default()));
    }

    #[test]
    fn test_mismatched_config_is_unrecognized() {
        let task: Task = serde_json::from_value(json!({
            "id": "t8",
            "type": "deploy",
            "config": {"ports": "8080:80"}
        }))
        .unwrap();

        assert!(matches!(
            task.kind,
            TaskKind::Unrecognized { ref type_name, .. } if type_name == "deploy"
        ));
        assert!(task.deploy_config().is_none());
    }

    #[test]
    fn test_serializes_type_beside_config() {
        let task = Task {
            id: "t4".to_string(),
            name: String::new(),
            status: "pending".to_string(),
            created_at: None,
            updated_at: None,
            scheduled_at: None,
            executed_at: None,
            stopped_at: None,
            upstream_task_id: None,
            stream_webhook: None,
            remarks: None,
            auto_run: false,
            timeout: Some(600),
            kind: TaskKind::Build(BuildConfig::default()),
        };

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "build");
        assert!(value["config"].is_object());
        assert_eq!(value["timeout"], 600);
    }

    #[test]
    fn test_with_env_rewrites_list() {
        let env: OrderedMap<String, String> = [("A", "1"), ("B", "x=y")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = DeployConfig::default().with_env(&env);
        assert_eq!(config.env, vec!["A=1", "B=x=y"]);
        assert_eq!(config.env_map(), env);
    }
}
