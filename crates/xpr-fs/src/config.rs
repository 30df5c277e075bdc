//! Repository configuration loading
//!
//! A managed repository pins its Vivado version and rewrite behavior in an
//! `xpr.toml` file at the repository root:
//!
//! ```toml
//! [vivado]
//! version = "2019.1"
//!
//! [rewrite]
//! drop_stale_block_design_lines = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, NormalizedPath, Result, io, layout::RepoPath};

/// Top-level repository configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoConfig {
    pub vivado: VivadoConfig,
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

/// Vivado tool pinning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VivadoConfig {
    /// The Vivado release the repository is checked in with, e.g. "2019.1".
    pub version: String,
    /// Binary to invoke; overridable so tests can substitute a stub.
    #[serde(default = "default_binary")]
    pub binary: String,
}

/// Rewrite behavior toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Drop workspace-path lines that also reference a block design,
    /// rather than only rewriting them. Such lines are stale once the
    /// wrapper-reconstruction commands regenerate the wrappers.
    #[serde(default = "default_true")]
    pub drop_stale_block_design_lines: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            drop_stale_block_design_lines: true,
        }
    }
}

fn default_binary() -> String {
    "vivado".to_string()
}

fn default_true() -> bool {
    true
}

impl RepoConfig {
    /// Load the configuration from `<root>/xpr.toml`.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(RepoPath::ConfigFile);
        if !path.exists() {
            return Err(Error::ConfigNotFound { path });
        }
        let content = io::read_text(&NormalizedPath::new(&path))?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(version = %config.vivado.version, "loaded repository config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(dir: &Path, content: &str) {
        std::fs::write(dir.join("xpr.toml"), content).unwrap();
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[vivado]\nversion = \"2019.1\"\n");

        let config = RepoConfig::load(dir.path()).unwrap();
        assert_eq!(config.vivado.version, "2019.1");
        assert_eq!(config.vivado.binary, "vivado");
        assert!(config.rewrite.drop_stale_block_design_lines);
    }

    #[test]
    fn rewrite_toggle_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[vivado]\nversion = \"2019.1\"\n\n[rewrite]\ndrop_stale_block_design_lines = false\n",
        );

        let config = RepoConfig::load(dir.path()).unwrap();
        assert!(!config.rewrite.drop_stale_block_design_lines);
    }

    #[test]
    fn missing_config_is_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let err = RepoConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn malformed_config_reports_path_and_message() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[vivado\nversion=");

        let err = RepoConfig::load(dir.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("xpr.toml"));
    }
}
