//! The single-pass rewrite driver
//!
//! [`Rewriter::process`] feeds a raw script through the rule table line by
//! line; [`rewrite_project`] wraps it with staging and an atomic commit so
//! a failed rewrite leaves no partial canonical tree behind.

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use regex::Regex;

use xpr_fs::{NormalizedPath, io, layout};

use crate::error::{Error, Result};
use crate::rules::{LinePass, RULE_TABLE};
use crate::state::ScanState;

/// Per-project rewrite parameters.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Canonical project name (directory base name).
    pub project_name: String,
    /// Originating workspace project directory the listed files resolve
    /// against.
    pub project_dir: PathBuf,
    /// Drop workspace-path lines that also reference a block design
    /// instead of only rewriting them. See `RewriteConfig`.
    pub drop_stale_block_design_lines: bool,
}

impl RewriteOptions {
    pub fn new(project_name: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_name: project_name.into(),
            project_dir: project_dir.into(),
            drop_stale_block_design_lines: true,
        }
    }
}

/// What a completed rewrite did.
#[derive(Debug)]
pub struct RewriteSummary {
    pub lines_read: usize,
    pub lines_emitted: usize,
    /// Workspace-relative paths copied into the canonical tree.
    pub files_copied: Vec<PathBuf>,
    /// Block designs whose wrapper references were suppressed.
    pub block_designs: Vec<String>,
}

/// Stateful line-by-line transformer for one project's raw export.
pub struct Rewriter {
    pub(crate) project_name: String,
    pub(crate) project_dir: PathBuf,
    pub(crate) drop_stale_block_design_lines: bool,
    /// Where extracted source files are placed (the staging tree).
    pub(crate) target_root: PathBuf,
    pub(crate) state: ScanState,
    pub(crate) wrapper_patterns: Vec<Regex>,
    pub(crate) block_designs: Vec<String>,
    pub(crate) files_copied: Vec<PathBuf>,
    pub(crate) listing_opened_at: Option<usize>,
    pub(crate) listing_closed: bool,
    pub(crate) current_line: usize,
}

impl Rewriter {
    /// Create a rewriter that extracts source files into `target_root`.
    ///
    /// Fails if the project directory cannot be resolved — listed files
    /// are made relative to its canonical form.
    pub fn new(options: RewriteOptions, target_root: impl Into<PathBuf>) -> Result<Self> {
        let project_dir = NormalizedPath::new(&options.project_dir).canonicalize()?;
        Ok(Self {
            project_name: options.project_name,
            project_dir,
            drop_stale_block_design_lines: options.drop_stale_block_design_lines,
            target_root: target_root.into(),
            state: ScanState::new(),
            wrapper_patterns: Vec::new(),
            block_designs: Vec::new(),
            files_copied: Vec::new(),
            listing_opened_at: None,
            listing_closed: false,
            current_line: 0,
        })
    }

    /// Run the raw script through the rule table.
    ///
    /// Returns the portable script lines. Side effect: every non-block-
    /// design file the listing section references is copied into the
    /// target root at its workspace-relative position.
    pub fn process<R: BufRead>(&mut self, input: R) -> Result<Vec<String>> {
        let mut output = Vec::new();

        for (index, line) in input.lines().enumerate() {
            let line = line.map_err(Error::Read)?;
            self.current_line = index + 1;

            let mut pass = LinePass::new(line);
            for (name, rule) in RULE_TABLE {
                let kept_before = pass.keep;
                rule(self, &mut pass)?;
                if kept_before && !pass.keep {
                    tracing::trace!(rule = name, line = self.current_line, "line dropped");
                }
            }

            if pass.keep {
                output.push(pass.text);
            }
            output.append(&mut pass.inject_after);
        }

        self.verify_markers()?;
        Ok(output)
    }

    /// A raw script that never produced the expected markers was not a
    /// well-formed export; passing its lines through silently would emit a
    /// mis-rewritten script.
    fn verify_markers(&self) -> Result<()> {
        if self.state.in_preamble() {
            return Err(Error::MissingBanner);
        }
        match self.listing_opened_at {
            None => Err(Error::ListingNotFound),
            Some(line) if !self.listing_closed => Err(Error::ListingNotClosed { line }),
            Some(_) => Ok(()),
        }
    }

    /// Summary of the work done so far.
    fn into_summary(self, lines_emitted: usize) -> RewriteSummary {
        RewriteSummary {
            lines_read: self.current_line,
            lines_emitted,
            files_copied: self.files_copied,
            block_designs: self.block_designs,
        }
    }
}

/// Rewrite one project's raw export and commit the results under
/// `<root>/sources/`.
///
/// Source files are extracted into a staging directory next to the sources
/// root and only renamed to `sources/<project>` once the whole script has
/// processed cleanly; the portable script lands at `sources/<project>.tcl`
/// and the unmodified export is preserved as `sources/<project>.tcl.raw`
/// for audit.
pub fn rewrite_project(
    root: &Path,
    raw_script: &Path,
    options: RewriteOptions,
) -> Result<RewriteSummary> {
    let project = options.project_name.clone();
    let sources_root = root.join(xpr_fs::RepoPath::Sources);
    fs::create_dir_all(&sources_root).map_err(|e| Error::io(&sources_root, e))?;

    // Staged in the same directory so the final rename stays on one
    // filesystem.
    let stage = sources_root.join(format!(".{}.{}.stage", project, std::process::id()));
    if stage.exists() {
        fs::remove_dir_all(&stage).map_err(|e| Error::io(&stage, e))?;
    }
    fs::create_dir_all(&stage).map_err(|e| Error::io(&stage, e))?;

    match rewrite_into_stage(root, raw_script, options, &stage) {
        Ok(summary) => Ok(summary),
        Err(e) => {
            let _ = fs::remove_dir_all(&stage);
            Err(e)
        }
    }
}

fn rewrite_into_stage(
    root: &Path,
    raw_script: &Path,
    options: RewriteOptions,
    stage: &Path,
) -> Result<RewriteSummary> {
    let project = options.project_name.clone();
    let raw = fs::read(raw_script).map_err(|e| Error::io(raw_script, e))?;

    let mut rewriter = Rewriter::new(options, stage)?;
    let lines = rewriter.process(raw.as_slice())?;

    // Commit: tree first, then the scripts, each atomically replacing any
    // previous check-in of the same project.
    let tree = layout::project_sources(root, &project);
    if tree.exists() {
        fs::remove_dir_all(&tree).map_err(|e| Error::io(&tree, e))?;
    }
    fs::rename(stage, &tree).map_err(|e| Error::io(&tree, e))?;

    let mut script = lines.join("\n");
    script.push('\n');
    io::write_atomic(
        &NormalizedPath::new(layout::project_script(root, &project)),
        script.as_bytes(),
    )?;
    io::write_atomic(
        &NormalizedPath::new(layout::project_raw_script(root, &project)),
        &raw,
    )?;

    tracing::info!(
        project = %project,
        files = rewriter.files_copied.len(),
        block_designs = rewriter.block_designs.len(),
        "project checked in"
    );
    Ok(rewriter.into_summary(lines.len()))
}
