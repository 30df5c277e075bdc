//! Constants and helpers for the canonical repository layout.
//!
//! A managed repository has two sibling trees: `workspace/` holds the live,
//! tool-managed Vivado projects (never committed), and `sources/` holds the
//! portable per-project scripts plus the extracted source trees.

use std::path::{Path, PathBuf};

/// Fixed paths at the root of a managed repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoPath {
    /// The `workspace` directory (live Vivado projects)
    Workspace,
    /// The `sources` directory (portable scripts and extracted sources)
    Sources,
    /// The `workspace.bak` directory (previous workspace, kept by checkout)
    WorkspaceBackup,
    /// The `xpr.toml` repository configuration file
    ConfigFile,
}

impl RepoPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Sources => "sources",
            Self::WorkspaceBackup => "workspace.bak",
            Self::ConfigFile => "xpr.toml",
        }
    }
}

impl AsRef<Path> for RepoPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for RepoPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The live project directory `workspace/<project>`.
pub fn project_workspace(root: &Path, project: &str) -> PathBuf {
    root.join(RepoPath::Workspace).join(project)
}

/// The extracted source tree `sources/<project>`.
pub fn project_sources(root: &Path, project: &str) -> PathBuf {
    root.join(RepoPath::Sources).join(project)
}

/// The portable reconstruction script `sources/<project>.tcl`.
pub fn project_script(root: &Path, project: &str) -> PathBuf {
    root.join(RepoPath::Sources).join(format!("{project}.tcl"))
}

/// The unrewritten audit copy `sources/<project>.tcl.raw`.
pub fn project_raw_script(root: &Path, project: &str) -> PathBuf {
    root.join(RepoPath::Sources)
        .join(format!("{project}.tcl.raw"))
}
