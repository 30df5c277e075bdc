//! Source file references and extraction
//!
//! The listing section of a raw export names every file that was local to
//! or imported into the original project, as an absolute path on the
//! exporting machine. Each reference is either a block-design wrapper
//! product (suppressed, regenerated at checkout) or a real source file to
//! be copied into the canonical tree at its workspace-relative position.

use std::fs;
use std::path::{Path, PathBuf};

use xpr_fs::NormalizedPath;

use crate::error::{Error, Result};
use crate::patterns;

/// A file path extracted from a listing-section comment line.
#[derive(Debug, Clone)]
pub struct SourceFileReference {
    path: NormalizedPath,
}

impl SourceFileReference {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self {
            path: NormalizedPath::new(raw.as_ref()),
        }
    }

    /// The referenced path in normalized form.
    pub fn as_str(&self) -> &str {
        self.path.as_str()
    }

    /// If the path lies under a block design's generated HDL output
    /// directory, the block design's name.
    pub fn block_design(&self) -> Option<&str> {
        patterns::BLOCK_DESIGN_HDL
            .captures(self.path.as_str())
            .map(|caps| caps.get(1).unwrap().as_str())
    }

    /// Copy the referenced file into `target_root` at its position relative
    /// to `project_dir`, creating parent directories as needed.
    ///
    /// Returns the relative path the file was placed at. Fails if the
    /// reference does not resolve to a file under `project_dir` — that
    /// means the export references something outside the project tree, and
    /// the script cannot be made portable.
    pub fn extract(&self, project_dir: &Path, target_root: &Path) -> Result<PathBuf> {
        let resolved = self.path.canonicalize()?;
        let relative = resolved
            .strip_prefix(project_dir)
            .map_err(|_| Error::UnresolvableReference {
                path: resolved.clone(),
                project_dir: project_dir.to_path_buf(),
            })?
            .to_path_buf();

        let target = target_root.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::copy(&resolved, &target).map_err(|e| Error::io(&target, e))?;

        tracing::debug!(file = %relative.display(), "extracted source file");
        Ok(relative)
    }
}
