//! Malformed raw exports must fail explicitly, never silently pass through.

use std::fs;

use xpr_rewrite::{Error, RewriteOptions, rewrite_project};
use xpr_test_utils::{RawScriptBuilder, TestRepo};

fn try_rewrite(repo: &TestRepo, raw: &str) -> Result<xpr_rewrite::RewriteSummary, Error> {
    let raw_path = repo.root().join(".demo.exported.tcl");
    fs::write(&raw_path, raw).unwrap();
    rewrite_project(
        repo.root(),
        &raw_path,
        RewriteOptions::new("demo", repo.root().join("workspace/demo")),
    )
}

#[test]
fn script_without_banner_delimiters_is_rejected() {
    let repo = TestRepo::new();
    repo.add_project("demo");

    // Strip every banner delimiter from an otherwise valid export.
    let project_dir = repo.root().join("workspace/demo");
    let raw: String = RawScriptBuilder::new("demo", &project_dir)
        .build()
        .lines()
        .filter(|line| !line.starts_with("#*"))
        .map(|line| format!("{line}\n"))
        .collect();

    let err = try_rewrite(&repo, &raw).unwrap_err();
    assert!(matches!(err, Error::MissingBanner));
    assert!(!repo.root().join("sources/demo.tcl").exists());
}

#[test]
fn truncated_banner_is_rejected() {
    let repo = TestRepo::new();
    repo.add_project("demo");

    // Only two delimiters: the whole script reads as preamble.
    let raw = "#*****\n# partial banner\n#*****\ncreate_project demo /tmp/demo\n";
    let err = try_rewrite(&repo, raw).unwrap_err();
    assert!(matches!(err, Error::MissingBanner));
}

#[test]
fn script_without_listing_section_is_rejected() {
    let repo = TestRepo::new();
    repo.add_project("demo");

    let raw = "\
#*****\n#*****\n#*****\n\
create_project demo /tmp/demo\n\
puts \"INFO: Project created:$project_name\"\n";
    let err = try_rewrite(&repo, raw).unwrap_err();
    assert!(matches!(err, Error::ListingNotFound));
}

#[test]
fn unclosed_listing_section_is_rejected() {
    let repo = TestRepo::new();
    repo.add_project("demo");

    let raw = "\
#*****\n#*****\n#*****\n\
# 2. The following source(s) files that were local or imported into the original project.\n\
puts \"INFO: Project created:$project_name\"\n";
    let err = try_rewrite(&repo, raw).unwrap_err();
    assert!(matches!(err, Error::ListingNotClosed { line: 4 }));
}

#[test]
fn missing_raw_script_is_rejected() {
    let repo = TestRepo::new();
    repo.add_project("demo");

    let result = rewrite_project(
        repo.root(),
        &repo.root().join("never-exported.tcl"),
        RewriteOptions::new("demo", repo.root().join("workspace/demo")),
    );
    assert!(matches!(result, Err(Error::Io { .. })));
}
