//! The ordered rule table
//!
//! Each line of the raw script flows through every rule in table order.
//! A rule may rewrite the line, change its disposition, mutate scan state,
//! or queue lines to inject after it. Later rules can override the
//! keep/drop decision of earlier ones — the last word wins, which is how
//! wrapper suppression drops lines an earlier rule already rewrote.

use crate::error::Result;
use crate::patterns;
use crate::rewriter::Rewriter;
use crate::sources::SourceFileReference;
use crate::state::ScanState;

/// A line in flight through the rule table.
#[derive(Debug)]
pub struct LinePass {
    /// Current text; rules rewrite in place.
    pub text: String,
    /// Whether the line will be emitted.
    pub keep: bool,
    /// Lines to emit immediately after this one.
    pub inject_after: Vec<String>,
}

impl LinePass {
    pub fn new(text: String) -> Self {
        Self {
            text,
            keep: true,
            inject_after: Vec::new(),
        }
    }
}

/// A single named rewrite rule.
pub type RuleFn = fn(&mut Rewriter, &mut LinePass) -> Result<()>;

/// The fixed rule order. Order is load-bearing: listing extraction must see
/// paths before the workspace-path rewrite touches them, and wrapper
/// suppression must run after the listing has registered its patterns.
pub const RULE_TABLE: &[(&str, RuleFn)] = &[
    ("strip-preamble", Rewriter::strip_preamble),
    ("orig-proj-dir", Rewriter::rewrite_orig_proj_dir),
    ("create-project", Rewriter::rewrite_create_project),
    ("active-project", Rewriter::rewrite_active_project),
    ("file-listing", Rewriter::scan_file_listing),
    ("workspace-paths", Rewriter::rewrite_workspace_paths),
    ("fileset-import", Rewriter::rewrite_fileset_import),
    ("wrapper-suppression", Rewriter::suppress_wrapper_block),
    ("file-import", Rewriter::rewrite_file_import),
    ("wrapper-reconstruction", Rewriter::inject_wrapper_reconstruction),
];

impl Rewriter {
    /// Drop everything up to and including the third banner delimiter.
    fn strip_preamble(&mut self, pass: &mut LinePass) -> Result<()> {
        let ScanState::Preamble { delimiters_seen } = self.state else {
            return Ok(());
        };

        let mut seen = delimiters_seen;
        if patterns::BANNER_DELIMITER.is_match(&pass.text) {
            seen += 1;
        }
        pass.keep = false;

        // The third delimiter line is still dropped; suppression ends
        // starting with the next line.
        self.state = if seen >= 3 {
            ScanState::Body
        } else {
            ScanState::Preamble {
                delimiters_seen: seen,
            }
        };
        Ok(())
    }

    /// Point the original-project-directory variable at the canonical
    /// source tree.
    fn rewrite_orig_proj_dir(&mut self, pass: &mut LinePass) -> Result<()> {
        if patterns::ORIG_PROJ_DIR.is_match(&pass.text) {
            pass.text = format!(
                "set orig_proj_dir \"[file normalize \"sources/{}\"]\"",
                self.project_name
            );
        }
        Ok(())
    }

    /// Create the project at the canonical workspace location instead of
    /// the absolute path the exporting machine embedded.
    fn rewrite_create_project(&mut self, pass: &mut LinePass) -> Result<()> {
        if patterns::CREATE_PROJECT.is_match(&pass.text) {
            pass.text = format!(
                "create_project {} workspace/{}",
                self.project_name, self.project_name
            );
        }
        Ok(())
    }

    /// Fetch the current project object under its canonical name.
    fn rewrite_active_project(&mut self, pass: &mut LinePass) -> Result<()> {
        if patterns::ACTIVE_PROJECT.is_match(&pass.text) {
            pass.text = format!("set obj [get_projects {}]", self.project_name);
        }
        Ok(())
    }

    /// Track the source file listing section and act on each reference:
    /// block-design HDL products register a suppression pattern, everything
    /// else is copied into the staged canonical tree.
    fn scan_file_listing(&mut self, pass: &mut LinePass) -> Result<()> {
        match self.state {
            ScanState::Body => {
                if patterns::LISTING_OPEN.is_match(&pass.text) {
                    self.state = ScanState::FileListing;
                    self.listing_opened_at = Some(self.current_line);
                    tracing::debug!(line = self.current_line, "source file listing opened");
                }
            }
            ScanState::FileListing => {
                if patterns::LISTING_CLOSE.is_match(&pass.text) {
                    self.state = ScanState::Body;
                    self.listing_closed = true;
                    tracing::debug!(line = self.current_line, "source file listing closed");
                    return Ok(());
                }
                if let Some(caps) = patterns::LISTED_FILE.captures(&pass.text) {
                    let reference = SourceFileReference::new(&caps[1]);
                    match reference.block_design() {
                        Some(name) => {
                            tracing::debug!(block_design = name, "registered wrapper suppression");
                            self.wrapper_patterns.push(patterns::wrapper_suppression(name));
                            self.block_designs.push(name.to_string());
                        }
                        None => {
                            let relative =
                                reference.extract(&self.project_dir, &self.target_root)?;
                            self.files_copied.push(relative);
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Replace the workspace-root fragment with the sources root. Lines
    /// that also reference a block design are stale once wrappers are
    /// regenerated, so by default they are dropped outright.
    fn rewrite_workspace_paths(&mut self, pass: &mut LinePass) -> Result<()> {
        if !pass.text.contains("/workspace/") {
            return Ok(());
        }
        if self.drop_stale_block_design_lines && pass.text.contains("/bd/") {
            pass.keep = false;
        }
        pass.text = pass.text.replace("/workspace/", "/sources/");
        Ok(())
    }

    /// Turn the bulk import-and-copy into a plain add: the copy already
    /// happened when the listing section was extracted.
    fn rewrite_fileset_import(&mut self, pass: &mut LinePass) -> Result<()> {
        if let Some(caps) = patterns::FILESET_IMPORT.captures(&pass.text) {
            pass.text = format!(
                "add_files -norecurse -fileset [get_filesets {}] $files",
                &caps[1]
            );
        }
        Ok(())
    }

    /// Drop the stale wrapper-file block for every registered block design,
    /// from the matching `set file` line up to the next blank line.
    fn suppress_wrapper_block(&mut self, pass: &mut LinePass) -> Result<()> {
        match self.state {
            ScanState::SuppressingWrapper => {
                pass.keep = false;
                if patterns::BLANK_LINE.is_match(&pass.text) {
                    self.state = ScanState::Body;
                }
            }
            ScanState::Body => {
                if self
                    .wrapper_patterns
                    .iter()
                    .any(|pattern| pattern.is_match(&pass.text))
                {
                    tracing::debug!(line = self.current_line, "suppressing stale wrapper block");
                    pass.keep = false;
                    self.state = ScanState::SuppressingWrapper;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Single-file variant of the import rewrite.
    fn rewrite_file_import(&mut self, pass: &mut LinePass) -> Result<()> {
        if let Some(caps) = patterns::FILE_IMPORT.captures(&pass.text) {
            pass.text = format!(
                "add_files -norecurse -fileset [get_filesets {}] $file",
                &caps[1]
            );
        }
        Ok(())
    }

    /// After the "Project created" status line, append commands that
    /// regenerate every block-design wrapper from scratch and add the
    /// results to the project. The raw export's own wrapper references are
    /// unreliable, which is why the suppression rule removed them.
    fn inject_wrapper_reconstruction(&mut self, pass: &mut LinePass) -> Result<()> {
        if patterns::PROJECT_CREATED.is_match(&pass.text) {
            pass.inject_after = wrapper_reconstruction(&self.project_name);
        }
        Ok(())
    }
}

/// The fixed command sequence that rebuilds block-design wrappers at
/// checkout time.
fn wrapper_reconstruction(project: &str) -> Vec<String> {
    vec![
        String::new(),
        "puts \"INFO: BEGINNING TO RECONSTRUCT BLOCK DESIGN WRAPPERS\"".to_string(),
        format!("foreach {{bd_file}} [glob workspace/{project}/{project}.srcs/*/bd/*/*.bd] {{"),
        "  make_wrapper -files [get_files $bd_file] -top".to_string(),
        "  }".to_string(),
        format!(
            "foreach {{wrapper_file}} [glob workspace/{project}/{project}.srcs/*/bd/*/hdl/*_wrapper.vhd] {{"
        ),
        "  add_files -norecurse $wrapper_file".to_string(),
        "  }".to_string(),
        "puts \"INFO: WRAPPERS CREATED\"".to_string(),
    ]
}
