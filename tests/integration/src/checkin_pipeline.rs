//! End-to-end check-in pipeline tests
//!
//! Drive the rewriting core over a realistic repository fixture and verify
//! the portable script, the extracted source tree, and the commit
//! guarantees.

use std::fs;

use pretty_assertions::assert_eq;

use xpr_fs::checksum::{file_checksum, tree_checksum};
use xpr_fs::layout;
use xpr_rewrite::{RewriteOptions, rewrite_project};
use xpr_test_utils::{RawScriptBuilder, TestRepo};

/// Build a repo with one project containing a plain source, a constraint
/// file, and a block design; returns the repo and the raw script text.
fn checked_in_fixture() -> (TestRepo, String) {
    let repo = TestRepo::new();
    let project = repo.add_project("demo");
    project.add_source("src/top.vhd", "entity top is end top;");
    project.add_source("constrs/pins.xdc", "set_property PACKAGE_PIN A1");

    let raw = RawScriptBuilder::new("demo", project.dir())
        .local_file("src/top.vhd")
        .local_file("constrs/pins.xdc")
        .block_design("clk_gen")
        .body_line("set_property target_language VHDL [current_project]")
        .build();
    (repo, raw)
}

fn run_checkin(repo: &TestRepo, raw: &str) -> xpr_rewrite::RewriteSummary {
    let raw_path = repo.root().join(".demo.exported.tcl");
    fs::write(&raw_path, raw).unwrap();
    rewrite_project(
        repo.root(),
        &raw_path,
        RewriteOptions::new("demo", repo.root().join("workspace/demo")),
    )
    .unwrap()
}

#[test]
fn portable_script_has_rewritten_commands_and_no_banner() {
    let (repo, raw) = checked_in_fixture();
    run_checkin(&repo, &raw);

    let script = fs::read_to_string(layout::project_script(repo.root(), "demo")).unwrap();

    // Banner suppressed entirely
    assert!(!script.contains("#*"));
    assert!(!script.contains("generated automatically"));

    // Creation, project-object, and project-dir lines are canonical
    assert!(script.contains("create_project demo workspace/demo\n"));
    assert!(script.contains("set obj [get_projects demo]\n"));
    assert!(script.contains("set orig_proj_dir \"[file normalize \"sources/demo\"]\"\n"));

    // Exactly one creation line
    assert_eq!(
        script
            .lines()
            .filter(|l| l.starts_with("create_project"))
            .count(),
        1
    );

    // Import commands decoupled from the copy step
    assert!(script.contains("add_files -norecurse -fileset [get_filesets sources_1] $files\n"));
    assert!(script.contains("add_files -norecurse -fileset [get_filesets constrs_1] $file\n"));
    assert!(!script.contains("import_files"));

    // Lines no rule targets pass through untouched
    assert!(script.contains("set_property target_language VHDL [current_project]\n"));
}

#[test]
fn block_design_wrapper_block_is_suppressed_and_reconstructed() {
    let (repo, raw) = checked_in_fixture();
    let summary = run_checkin(&repo, &raw);

    assert_eq!(summary.block_designs, vec!["clk_gen".to_string()]);

    let script = fs::read_to_string(layout::project_script(repo.root(), "demo")).unwrap();

    // The stale wrapper block is gone, including its property lines
    assert!(!script.contains("set file \"hdl/clk_gen_wrapper.vhd\""));
    assert!(!script.contains("xil_defaultlib"));

    // The reconstruction sequence is injected after the creation message
    let created = script
        .find("puts \"INFO: Project created:$project_name\"")
        .expect("creation message survives");
    let reconstruct = script
        .find("puts \"INFO: BEGINNING TO RECONSTRUCT BLOCK DESIGN WRAPPERS\"")
        .expect("reconstruction block injected");
    assert!(reconstruct > created);
    assert!(script.contains("make_wrapper -files [get_files $bd_file] -top"));
    assert!(script.contains("glob workspace/demo/demo.srcs/*/bd/*/hdl/*_wrapper.vhd"));

    // The wrapper itself was never copied into the canonical tree
    assert!(!layout::project_sources(repo.root(), "demo")
        .join("demo.srcs")
        .exists());
}

#[test]
fn extracted_tree_is_byte_identical_to_workspace_files() {
    let (repo, raw) = checked_in_fixture();
    let summary = run_checkin(&repo, &raw);

    assert_eq!(summary.files_copied.len(), 2);

    for relative in ["src/top.vhd", "constrs/pins.xdc"] {
        let original = repo.root().join("workspace/demo").join(relative);
        let copy = layout::project_sources(repo.root(), "demo").join(relative);
        assert_eq!(
            file_checksum(&copy).unwrap(),
            file_checksum(&original).unwrap(),
            "extracted copy of {relative} must match the workspace original"
        );
    }
}

#[test]
fn raw_audit_copy_is_preserved_verbatim() {
    let (repo, raw) = checked_in_fixture();
    run_checkin(&repo, &raw);

    let audit = fs::read_to_string(layout::project_raw_script(repo.root(), "demo")).unwrap();
    assert_eq!(audit, raw);
}

#[test]
fn rerunning_checkin_is_idempotent() {
    let (repo, raw) = checked_in_fixture();

    run_checkin(&repo, &raw);
    let script_first =
        fs::read(layout::project_script(repo.root(), "demo")).unwrap();
    let tree_first = tree_checksum(&layout::project_sources(repo.root(), "demo")).unwrap();

    run_checkin(&repo, &raw);
    let script_second =
        fs::read(layout::project_script(repo.root(), "demo")).unwrap();
    let tree_second = tree_checksum(&layout::project_sources(repo.root(), "demo")).unwrap();

    assert_eq!(script_first, script_second);
    assert_eq!(tree_first, tree_second);
}

#[test]
fn unresolvable_reference_commits_nothing() {
    let repo = TestRepo::new();
    let project = repo.add_project("demo");
    project.add_source("src/top.vhd", "entity top;");

    // A file outside the project tree; the export should never reference
    // one, and when it does the project must fail loudly.
    let stray_dir = tempfile::tempdir().unwrap();
    let stray = stray_dir.path().join("stray.vhd");
    fs::write(&stray, "stray").unwrap();

    let raw = RawScriptBuilder::new("demo", project.dir())
        .local_file("src/top.vhd")
        .local_file_absolute(&stray)
        .build();
    let raw_path = repo.root().join(".demo.exported.tcl");
    fs::write(&raw_path, &raw).unwrap();

    let result = rewrite_project(
        repo.root(),
        &raw_path,
        RewriteOptions::new("demo", project.dir()),
    );
    assert!(matches!(
        result,
        Err(xpr_rewrite::Error::UnresolvableReference { .. })
    ));

    assert!(!layout::project_sources(repo.root(), "demo").exists());
    assert!(!layout::project_script(repo.root(), "demo").exists());
    assert!(!layout::project_raw_script(repo.root(), "demo").exists());
}

#[cfg(unix)]
#[test]
fn stub_exporter_feeds_the_rewriter() {
    use std::os::unix::fs::PermissionsExt;
    use xpr_vivado::VivadoTool;

    let (repo, raw) = checked_in_fixture();

    // Stand-in for Vivado's TCL shell: reads the write_project_tcl command
    // from stdin and materializes the canned export at the requested path.
    fs::write(repo.root().join("canned.tcl"), &raw).unwrap();
    let stub = repo.root().join("vivado-stub");
    fs::write(
        &stub,
        "#!/bin/sh\nread cmd\nout=$(printf '%s' \"$cmd\" | sed 's/.*-force \"\\(.*\\)\".*/\\1/')\ncp canned.tcl \"$out\"\n",
    )
    .unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    let tool = VivadoTool::new(stub.display().to_string());
    let raw_path = repo.root().join(".demo.exported.tcl");
    tool.export_project(
        &repo.root().join("workspace/demo/demo.xpr"),
        &raw_path,
        repo.root(),
    )
    .unwrap();

    let summary = rewrite_project(
        repo.root(),
        &raw_path,
        RewriteOptions::new("demo", repo.root().join("workspace/demo")),
    )
    .unwrap();

    assert_eq!(summary.files_copied.len(), 2);
    assert!(layout::project_script(repo.root(), "demo").is_file());
}
