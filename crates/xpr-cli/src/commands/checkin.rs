//! Check every workspace project into the sources tree

use std::fs;
use std::path::Path;

use colored::Colorize;

use xpr_fs::{RepoConfig, RepoPath};
use xpr_rewrite::{RewriteOptions, RewriteSummary, rewrite_project};
use xpr_vivado::VivadoTool;

use crate::error::{CliError, Result};

use super::{Project, discover_projects};

/// Run the checkin command
pub fn run_checkin(root: &Path, skip_version_check: bool) -> Result<()> {
    let config = RepoConfig::load(root)?;

    if skip_version_check {
        tracing::warn!("skipping Vivado version check");
    } else {
        let path_var = std::env::var("PATH").unwrap_or_default();
        xpr_vivado::verify_environment(&config.vivado.version, &path_var)?;
    }

    let projects = discover_projects(root)?;
    if projects.is_empty() {
        println!(
            "No projects found under {}{}.",
            RepoPath::Workspace,
            std::path::MAIN_SEPARATOR
        );
        return Ok(());
    }

    let tool = VivadoTool::new(&config.vivado.binary);
    let mut failed: Vec<String> = Vec::new();

    for project in &projects {
        println!("{} {}", "Checking in".bold(), project.name.cyan());
        match checkin_project(root, &tool, &config, project) {
            Ok(summary) => {
                println!(
                    "  {} {} source file(s), {} block design(s), {} script line(s)",
                    "done:".green().bold(),
                    summary.files_copied.len(),
                    summary.block_designs.len(),
                    summary.lines_emitted
                );
            }
            Err(e) => {
                // A broken project must not block the rest of the batch.
                eprintln!("  {} {}", "failed:".red().bold(), e);
                failed.push(project.name.clone());
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} project(s) failed to check in: {}",
            failed.len(),
            failed.join(", ")
        )))
    }
}

/// Export one project's TCL and rewrite it into the portable form.
fn checkin_project(
    root: &Path,
    tool: &VivadoTool,
    config: &RepoConfig,
    project: &Project,
) -> Result<RewriteSummary> {
    let raw_path = root.join(format!(
        ".{}.{}.exported.tcl",
        project.name,
        std::process::id()
    ));

    tool.export_project(&project.xpr_file, &raw_path, root)?;

    let mut options = RewriteOptions::new(&project.name, &project.dir);
    options.drop_stale_block_design_lines = config.rewrite.drop_stale_block_design_lines;
    let result = rewrite_project(root, &raw_path, options);

    // The raw export was preserved as sources/<name>.tcl.raw; the working
    // copy is no longer needed even when the rewrite failed.
    let _ = fs::remove_file(&raw_path);

    Ok(result?)
}
