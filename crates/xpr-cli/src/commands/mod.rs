//! Command implementations for xpr-cli

pub mod checkin;
pub mod checkout;
pub mod list;

pub use checkin::run_checkin;
pub use checkout::run_checkout;
pub use list::run_list;

use std::path::{Path, PathBuf};

use xpr_fs::RepoPath;

/// A discovered workspace project.
#[derive(Debug, Clone)]
pub(crate) struct Project {
    pub name: String,
    pub dir: PathBuf,
    pub xpr_file: PathBuf,
}

/// Find every `workspace/<name>` directory containing a `.xpr` project
/// file, sorted by name.
pub(crate) fn discover_projects(root: &Path) -> std::io::Result<Vec<Project>> {
    let workspace = root.join(RepoPath::Workspace);
    let mut projects = Vec::new();

    if !workspace.is_dir() {
        return Ok(projects);
    }

    for entry in std::fs::read_dir(&workspace)? {
        let entry = entry?;
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        if let Some(xpr_file) = find_xpr_file(&dir)? {
            projects.push(Project {
                name: entry.file_name().to_string_lossy().into_owned(),
                dir,
                xpr_file,
            });
        }
    }

    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}

/// First `.xpr` file in the directory, if any.
fn find_xpr_file(dir: &Path) -> std::io::Result<Option<PathBuf>> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "xpr"))
        .collect();
    candidates.sort();
    Ok(candidates.into_iter().next())
}
