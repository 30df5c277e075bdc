//! Rebuild the workspace from checked-in project scripts

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;

use xpr_fs::{RepoConfig, RepoPath};
use xpr_vivado::VivadoTool;

use crate::error::{CliError, Result};

/// Run the checkout command
pub fn run_checkout(root: &Path, skip_version_check: bool) -> Result<()> {
    let config = RepoConfig::load(root)?;

    if skip_version_check {
        tracing::warn!("skipping Vivado version check");
    } else {
        let path_var = std::env::var("PATH").unwrap_or_default();
        xpr_vivado::verify_environment(&config.vivado.version, &path_var)?;
    }

    let scripts = project_scripts(root)?;
    if scripts.is_empty() {
        println!(
            "No project scripts found under {}{}.",
            RepoPath::Sources,
            std::path::MAIN_SEPARATOR
        );
        return Ok(());
    }

    rotate_workspace(root)?;

    let tool = VivadoTool::new(&config.vivado.binary);
    let mut failed: Vec<String> = Vec::new();

    for script in &scripts {
        let name = script
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("{} {}", "Restoring".bold(), name.cyan());
        if let Err(e) = tool.replay_script(script, root) {
            eprintln!("  {} {}", "failed:".red().bold(), e);
            failed.push(name);
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} project(s) failed to check out: {}",
            failed.len(),
            failed.join(", ")
        )))
    }
}

/// Move any existing workspace aside and start fresh.
///
/// Only one backup generation is kept; checking out twice destroys the
/// previous backup.
fn rotate_workspace(root: &Path) -> Result<()> {
    let workspace = root.join(RepoPath::Workspace);
    let backup = root.join(RepoPath::WorkspaceBackup);

    if workspace.is_dir() {
        if backup.is_dir() {
            println!(
                "{} destroying previous workspace backup",
                "warning:".yellow().bold()
            );
            fs::remove_dir_all(&backup)?;
        }
        println!("Backing up current workspace to {}", RepoPath::WorkspaceBackup);
        fs::rename(&workspace, &backup)?;
    }
    fs::create_dir_all(&workspace)?;
    Ok(())
}

/// Every `sources/*.tcl` script, sorted by name. The `.tcl.raw` audit
/// copies are not replayable and are skipped.
fn project_scripts(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let sources = root.join(RepoPath::Sources);
    let mut scripts = Vec::new();

    if !sources.is_dir() {
        return Ok(scripts);
    }

    for entry in fs::read_dir(&sources)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "tcl") {
            scripts.push(path);
        }
    }

    scripts.sort();
    Ok(scripts)
}
