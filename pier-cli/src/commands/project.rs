//! Project command handlers

use anyhow::Result;
use colored::*;
use pier_client::pages;
use pier_core::domain::project::{Project, Server};
use pier_core::domain::user::User;

use super::{format_time, require_page};
use crate::config::Config;

/// List every project visible to the user
pub async fn list_projects(config: &Config) -> Result<()> {
    let client = config.api_client();
    let page = require_page(pages::load_projects(&client).await)?;

    if page.projects.is_empty() {
        println!("{}", "No projects found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} project(s):", page.projects.len()).bold()
        );
        println!();
        for project in &page.projects {
            print_project_summary(project);
        }
    }

    Ok(())
}

/// Show one project with its members and servers
pub async fn show_project(config: &Config, slug: &str) -> Result<()> {
    let client = config.api_client();
    let page = require_page(pages::load_project(&client, slug).await)?;

    let Some(project) = page.project else {
        println!("{}", format!("Project {} could not be loaded.", slug).yellow());
        return Ok(());
    };

    print_project_details(&project, &page.users);

    Ok(())
}

/// Print a project summary
fn print_project_summary(project: &Project) {
    println!("  {} {}", "▸".cyan(), project.name.bold());
    println!("    ID:      {}", project.id.dimmed());
    println!("    Members: {}", project.members.len());
    println!("    Created: {}", format_time(project.created_at).dimmed());
    println!();
}

/// Print detailed project information
fn print_project_details(project: &Project, users: &[User]) {
    println!("{}", "Project Details:".bold());
    println!("  ID:      {}", project.id.cyan());
    println!("  Name:    {}", project.name.bold());
    println!("  Created: {}", format_time(project.created_at));

    println!("\n{}", "Members:".bold());
    for member in &project.members {
        let user = users.iter().find(|u| u.id == member.user_id);
        let label = match user {
            Some(u) if !u.name.is_empty() => format!("{} <{}>", u.name, u.email),
            Some(u) => u.email.clone(),
            None => member.user_id.clone(),
        };
        let owner = if member.user_id == project.owner_user_id {
            " (owner)".cyan().to_string()
        } else {
            String::new()
        };
        let role = member.role.as_deref().unwrap_or("member");
        println!("  - {}{} {}", label, owner, role.dimmed());
    }

    print_servers("Build servers", &project.build_servers);
    print_servers("Deploy servers", &project.deploy_servers);
}

fn print_servers(title: &str, servers: &[Server]) {
    if servers.is_empty() {
        return;
    }

    println!("\n{}", format!("{}:", title).bold());
    for server in servers {
        println!("  {} {} {}", "▸".cyan(), server.name.bold(), server.host.dimmed());
        if let Some(selected) = &server.selected_network {
            println!("    Network:  {}", selected);
        }
        if let Some(networks) = &server.networks {
            let names: Vec<_> = networks.keys().map(String::as_str).collect();
            if !names.is_empty() {
                println!("    Networks: {}", names.join(", ").dimmed());
            }
        }
    }
}
