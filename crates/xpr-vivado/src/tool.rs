//! Vivado subprocess invocations

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Handle on the Vivado executable.
///
/// The binary name is injected rather than hard-coded so tests can
/// substitute a stub, and so installations with versioned launcher names
/// keep working.
#[derive(Debug, Clone)]
pub struct VivadoTool {
    binary: String,
}

impl VivadoTool {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Export a project's reconstruction script.
    ///
    /// Opens the project in Vivado's TCL shell and issues
    /// `write_project_tcl`; the shell exits when stdin closes. The raw
    /// script lands at `output`.
    pub fn export_project(&self, project_file: &Path, output: &Path, cwd: &Path) -> Result<()> {
        tracing::info!(project = %project_file.display(), "exporting project TCL");

        let mut child = Command::new(&self.binary)
            .args(["-nojournal", "-nolog", "-mode", "tcl"])
            .arg(project_file)
            .current_dir(cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Spawn {
                tool: self.binary.clone(),
                source: e,
            })?;

        let command = format!(
            "write_project_tcl -force \"{}\"\n",
            output.display().to_string().replace('\\', "/")
        );
        child
            .stdin
            .take()
            .expect("stdin was piped")
            .write_all(command.as_bytes())
            .map_err(|e| Error::Stdin {
                tool: self.binary.clone(),
                source: e,
            })?;

        self.wait(child)
    }

    /// Replay a portable reconstruction script in batch mode.
    ///
    /// Run from the repository root so the script's repository-relative
    /// paths resolve.
    pub fn replay_script(&self, script: &Path, cwd: &Path) -> Result<()> {
        tracing::info!(script = %script.display(), "replaying project TCL");

        let child = Command::new(&self.binary)
            .args(["-mode", "batch", "-nojournal", "-nolog", "-source"])
            .arg(script)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Spawn {
                tool: self.binary.clone(),
                source: e,
            })?;

        self.wait(child)
    }

    fn wait(&self, child: std::process::Child) -> Result<()> {
        let output = child.wait_with_output().map_err(|e| Error::Spawn {
            tool: self.binary.clone(),
            source: e,
        })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::ToolFailed {
                tool: self.binary.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
