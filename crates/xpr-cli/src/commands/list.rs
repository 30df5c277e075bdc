//! List projects and their check-in state

use std::collections::BTreeSet;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use xpr_fs::layout;

use crate::error::Result;

use super::discover_projects;

/// Where a project exists: in the live workspace, in the sources tree, or
/// both.
#[derive(Debug, Serialize)]
struct ProjectStatus {
    name: String,
    in_workspace: bool,
    checked_in: bool,
}

/// Run the list command
pub fn run_list(root: &Path, json: bool) -> Result<()> {
    let statuses = collect_statuses(root)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    if statuses.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    println!("{}", "Projects".bold());
    println!();
    for status in &statuses {
        let state = match (status.in_workspace, status.checked_in) {
            (true, true) => "workspace + sources".green(),
            (true, false) => "workspace only (not checked in)".yellow(),
            (false, true) => "sources only (not checked out)".cyan(),
            (false, false) => unreachable!("status rows come from one of the two trees"),
        };
        println!("  {:<20} {}", status.name.bold(), state);
    }
    println!();
    println!("{} {} project(s)", "Total:".dimmed(), statuses.len());

    Ok(())
}

fn collect_statuses(root: &Path) -> Result<Vec<ProjectStatus>> {
    let workspace_names: BTreeSet<String> = discover_projects(root)?
        .into_iter()
        .map(|p| p.name)
        .collect();

    let mut checked_in_names: BTreeSet<String> = BTreeSet::new();
    let sources = root.join(xpr_fs::RepoPath::Sources);
    if sources.is_dir() {
        for entry in std::fs::read_dir(&sources)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "tcl") {
                if let Some(stem) = path.file_stem() {
                    checked_in_names.insert(stem.to_string_lossy().into_owned());
                }
            }
        }
    }

    let all: BTreeSet<&String> = workspace_names.union(&checked_in_names).collect();
    let statuses = all
        .into_iter()
        .map(|name| ProjectStatus {
            name: name.clone(),
            in_workspace: workspace_names.contains(name),
            // The script is the authoritative artifact; the tree alone is
            // not a usable check-in.
            checked_in: layout::project_script(root, name).is_file(),
        })
        .collect();

    Ok(statuses)
}
