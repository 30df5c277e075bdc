//! Managed-repository fixtures

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary managed repository: `xpr.toml`, `workspace/`, `sources/`.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a repository pinned to Vivado 2019.1 with default rewrite
    /// behavior.
    pub fn new() -> Self {
        Self::with_config("[vivado]\nversion = \"2019.1\"\n")
    }

    /// Create a repository with the given `xpr.toml` contents.
    pub fn with_config(config: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp repository");
        fs::write(dir.path().join("xpr.toml"), config).unwrap();
        fs::create_dir_all(dir.path().join("workspace")).unwrap();
        fs::create_dir_all(dir.path().join("sources")).unwrap();
        Self { dir }
    }

    /// The repository root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Add a workspace project with its `.xpr` project file.
    pub fn add_project(&self, name: &str) -> ProjectFixture {
        let dir = self.dir.path().join("workspace").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{name}.xpr")), "<Project/>").unwrap();
        ProjectFixture {
            name: name.to_string(),
            dir,
        }
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

/// One workspace project inside a [`TestRepo`].
pub struct ProjectFixture {
    name: String,
    dir: PathBuf,
}

impl ProjectFixture {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The project directory `workspace/<name>`.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The `.xpr` project file.
    pub fn xpr_file(&self) -> PathBuf {
        self.dir.join(format!("{}.xpr", self.name))
    }

    /// Create a source file under the project directory; returns its
    /// absolute path.
    pub fn add_source(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }
}
