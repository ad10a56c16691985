//! Pipeline command handlers
//!
//! Handles listing the pipelines of a project and inspecting one task.

use anyhow::{Context, Result};
use colored::*;
use pier_client::pages;
use pier_core::OrderedMap;
use pier_core::domain::pipeline::Pipeline;
use pier_core::domain::task::{BuildConfig, DeployConfig, Task, TaskKind};
use pier_core::dto::task::TaskUpdateInput;
use pier_core::pairs::to_pairs;

use super::{colorize_status, format_time, require_page};
use crate::config::Config;

/// List the pipelines of a project
pub async fn list_pipelines(config: &Config, project_id: &str) -> Result<()> {
    let client = config.api_client();
    let page = require_page(pages::load_pipelines(&client, project_id).await)?;

    if page.pipelines.is_empty() {
        println!("{}", "No pipelines found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} pipeline(s):", page.pipelines.len()).bold()
        );
        println!();
        for pipeline in &page.pipelines {
            print_pipeline_summary(pipeline);
        }
    }

    Ok(())
}

/// Show one task, optionally with environment overrides applied
///
/// # Arguments
/// * `project_id` - Project owning the pipeline
/// * `pipeline_id` - Pipeline owning the task
/// * `task_id` - The task to show
/// * `env` - `KEY=value` overrides merged into a deploy task's environment
/// * `json` - Print the update body instead of the details
pub async fn show_task(
    config: &Config,
    project_id: &str,
    pipeline_id: &str,
    task_id: &str,
    env: Vec<(String, String)>,
    json: bool,
) -> Result<()> {
    let client = config.api_client();
    let page = require_page(pages::load_pipelines(&client, project_id).await)?;

    let pipeline = page
        .pipelines
        .iter()
        .find(|p| p.id == pipeline_id)
        .with_context(|| format!("Pipeline {} not found in project {}", pipeline_id, project_id))?;
    let task = pipeline
        .task(task_id)
        .with_context(|| format!("Task {} not found in pipeline {}", task_id, pipeline_id))?;

    let kind = apply_env(task.kind.clone(), env)?;

    if json {
        let body = TaskUpdateInput::new(&pipeline.id, &task.id, Some(kind));
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_task_details(pipeline, task, &kind);
    }

    Ok(())
}

/// Merge environment overrides into a deploy task
///
/// Existing keys keep their position; new keys are appended.
fn apply_env(kind: TaskKind, overrides: Vec<(String, String)>) -> Result<TaskKind> {
    if overrides.is_empty() {
        return Ok(kind);
    }

    match kind {
        TaskKind::Deploy(config) => {
            let mut env = config.env_map();
            env.extend(overrides);
            Ok(TaskKind::Deploy(config.with_env(&env)))
        }
        _ => anyhow::bail!("--env only applies to deploy tasks"),
    }
}

/// Print a pipeline summary
fn print_pipeline_summary(pipeline: &Pipeline) {
    println!("  {} {}", "▸".cyan(), pipeline.name.bold());
    println!("    ID:      {}", pipeline.id.dimmed());
    println!("    Status:  {}", colorize_status(&pipeline.status));
    println!("    Tasks:   {}", pipeline.tasks.len());
    println!("    Created: {}", format_time(pipeline.created_at).dimmed());
    if !pipeline.labels.is_empty() {
        println!("    Labels:  {}", to_pairs(Some(&pipeline.labels)).join(", ").dimmed());
    }
    if let Some(repo) = &pipeline.repo_watched {
        let branch = pipeline.branch_watched.as_deref().unwrap_or("*");
        println!("    Watches: {}@{}", repo, branch);
    }
    println!();
}

/// Print detailed task information
fn print_task_details(pipeline: &Pipeline, task: &Task, kind: &TaskKind) {
    println!("{}", "Task Details:".bold());
    println!("  ID:        {}", task.id.cyan());
    println!("  Name:      {}", task.name.bold());
    println!("  Pipeline:  {}", pipeline.name);
    println!("  Type:      {}", kind.type_name());
    println!("  Status:    {}", colorize_status(&task.status));
    if let Some(image) = kind.image() {
        println!("  Image:     {}", image);
    }
    if let Some(upstream) = &task.upstream_task_id {
        println!("  After:     {}", upstream);
    }
    if let Some(timeout) = task.timeout {
        println!("  Timeout:   {}s", timeout);
    }
    println!("  Auto run:  {}", task.auto_run);
    println!("  Scheduled: {}", format_time(task.scheduled_at).dimmed());
    println!("  Executed:  {}", format_time(task.executed_at).dimmed());
    println!("  Stopped:   {}", format_time(task.stopped_at).dimmed());
    if let Some(remarks) = &task.remarks {
        println!("  Remarks:   {}", remarks);
    }

    match kind {
        TaskKind::Build(config) => print_build_config(config),
        TaskKind::Deploy(config) => print_deploy_config(config),
        TaskKind::Unrecognized { config, .. } => {
            println!("\n{}", "Config:".bold());
            println!("  {}", config);
        }
    }
}

fn print_build_config(config: &BuildConfig) {
    println!("\n{}", "Build:".bold());
    println!("  Repository: {} ({})", config.repo_name, config.repo_url.dimmed());
    if let Some(branch) = &config.branch {
        println!("  Branch:     {}", branch);
    }
    println!("  Dockerfile: {}", config.dockerfile);
    print_map("Build args", &config.build_args);
}

fn print_deploy_config(config: &DeployConfig) {
    println!("\n{}", "Deploy:".bold());
    println!("  Service:    {}", config.service_name);
    if let Some(policy) = &config.restart_policy {
        println!("  Restart:    {}", policy);
    }
    if let Some(command) = &config.command {
        println!("  Command:    {}", command.join(" "));
    }
    print_map("Ports", &config.ports);
    print_map("Volumes", &config.volumes);
    print_map("Mounts", &config.mounts);
    print_map("Networks", &config.networks);
    print_map("Env", &config.env_map());
}

fn print_map(title: &str, map: &OrderedMap<String, String>) {
    if map.is_empty() {
        return;
    }

    println!("  {}:", title);
    for (key, value) in map.iter() {
        println!("    {} {} {}", key.cyan(), "→".dimmed(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deploy(env: &[&str]) -> TaskKind {
        TaskKind::Deploy(DeployConfig {
            env: env.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_apply_env_overrides_and_appends() {
        let kind = apply_env(
            deploy(&["A=1", "B=2"]),
            vec![
                ("B".to_string(), "20".to_string()),
                ("C".to_string(), "3".to_string()),
            ],
        )
        .unwrap();

        let TaskKind::Deploy(config) = kind else {
            panic!("expected deploy task");
        };
        assert_eq!(config.env, vec!["A=1", "B=20", "C=3"]);
    }

    #[test]
    fn test_apply_env_without_overrides_is_unchanged() {
        assert_eq!(apply_env(deploy(&["X"]), Vec::new()).unwrap(), deploy(&["X"]));
    }

    #[test]
    fn test_apply_env_rejects_build_tasks() {
        let build = TaskKind::Build(BuildConfig::default());
        assert!(apply_env(build, vec![("A".to_string(), "1".to_string())]).is_err());
    }
}
