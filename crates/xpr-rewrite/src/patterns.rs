//! Line patterns for the rewrite rules
//!
//! Every pattern the rule table matches against, compiled once. The shapes
//! follow Vivado's `write_project_tcl` generation conventions: a banner of
//! `#***` delimiter lines, numbered section markers for file categories,
//! and quoted absolute paths in comment lines.

use regex::Regex;
use std::sync::LazyLock;

/// A banner delimiter line: `#` followed by one or more `*`.
pub static BANNER_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\*+").unwrap());

/// Declaration of the original project directory variable.
pub static ORIG_PROJ_DIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"set orig_proj_dir ").unwrap());

/// The project creation command.
pub static CREATE_PROJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^create_project").unwrap());

/// Fetch of the current project object by name.
pub static ACTIVE_PROJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^set obj \[get_projects \S+\]").unwrap());

/// Marker comment opening the local/imported source file listing.
pub static LISTING_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"# 2\. The following source\(s\) files that were local or imported into the original project",
    )
    .unwrap()
});

/// Marker comment opening the remote-files section, which closes the listing.
pub static LISTING_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"# 3\. The following remote source files that were added to the original project:-")
        .unwrap()
});

/// A quoted path comment line inside the listing section.
pub static LISTED_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^#\s+"(.*)"$"#).unwrap());

/// A path under a block design's generated HDL output directory.
pub static BLOCK_DESIGN_HDL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/bd/(.*)/hdl/").unwrap());

/// Bulk import of files into a fileset, assigned to a variable.
pub static FILESET_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"set imported_files \[import_files -fileset (\S+) ").unwrap());

/// Import of the single `$file` into a fileset, assigned to a variable.
pub static FILE_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^set file_imported \[import_files -fileset (\S+) \$file\]$").unwrap()
});

/// The post-creation status line the wrapper reconstruction follows.
pub static PROJECT_CREATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^puts "INFO: Project created:\$project_name"$"#).unwrap());

/// An empty or whitespace-only line.
pub static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*$").unwrap());

/// Pattern matching the generated wrapper-file assignment for one block
/// design, used to suppress the stale wrapper block in the raw export.
pub fn wrapper_suppression(block_design: &str) -> Regex {
    Regex::new(&format!(
        r#"^set file "hdl/{}_wrapper\.vhd"$"#,
        regex::escape(block_design)
    ))
    .unwrap()
}
