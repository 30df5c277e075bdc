//! Raw Vivado export script generation
//!
//! Builds scripts shaped the way `write_project_tcl` emits them: a banner
//! comment block delimited by three `#***` lines, numbered section markers
//! for the file categories, quoted absolute paths in comment lines, and
//! the import/creation commands the rewriter targets.

use std::path::Path;

/// Builder for a raw export script of one project.
pub struct RawScriptBuilder {
    project: String,
    project_dir: String,
    local_files: Vec<String>,
    block_designs: Vec<String>,
    extra_lines: Vec<String>,
}

impl RawScriptBuilder {
    pub fn new(project: &str, project_dir: &Path) -> Self {
        Self {
            project: project.to_string(),
            project_dir: project_dir.display().to_string().replace('\\', "/"),
            local_files: Vec::new(),
            block_designs: Vec::new(),
            extra_lines: Vec::new(),
        }
    }

    /// List a local/imported source file by project-relative path.
    pub fn local_file(mut self, relative: &str) -> Self {
        self.local_files
            .push(format!("{}/{}", self.project_dir, relative));
        self
    }

    /// List a local/imported file by absolute path, bypassing the project
    /// directory (for exercising unresolvable references).
    pub fn local_file_absolute(mut self, absolute: &Path) -> Self {
        self.local_files
            .push(absolute.display().to_string().replace('\\', "/"));
        self
    }

    /// Add a block design; lists its generated wrapper in the file listing
    /// and appends the stale wrapper block the rewriter must suppress.
    pub fn block_design(mut self, name: &str) -> Self {
        self.block_designs.push(name.to_string());
        self
    }

    /// Append an arbitrary body line after the import commands.
    pub fn body_line(mut self, line: &str) -> Self {
        self.extra_lines.push(line.to_string());
        self
    }

    /// Render the raw script.
    pub fn build(self) -> String {
        let Self {
            project,
            project_dir,
            local_files,
            block_designs,
            extra_lines,
        } = self;

        let mut lines: Vec<String> = Vec::new();

        let delimiter = format!("#{}", "*".repeat(89));
        lines.push(delimiter.clone());
        lines.push("# Vivado (TM) v2019.1 (64-bit)".to_string());
        lines.push("#".to_string());
        lines.push(format!(
            "# {project}.tcl: Tcl script for re-creating project '{project}'"
        ));
        lines.push("#".to_string());
        lines.push(delimiter.clone());
        lines.push("# NOTE: this file was generated automatically.".to_string());
        lines.push("#".to_string());
        lines.push(delimiter);

        lines.push(format!(
            "set orig_proj_dir \"[file normalize \"{project_dir}\"]\""
        ));
        lines.push(format!("create_project {project} {project_dir}"));
        lines.push(format!("set obj [get_projects {project}]"));
        lines.push(
            "# 1. The following source(s) files that were added to the original project:-"
                .to_string(),
        );
        lines.push(
            "# 2. The following source(s) files that were local or imported into the original project."
                .to_string(),
        );
        for file in &local_files {
            lines.push(format!("#   \"{file}\""));
        }
        for bd in &block_designs {
            lines.push(format!(
                "#   \"{project_dir}/{project}.srcs/sources_1/bd/{bd}/hdl/{bd}_wrapper.vhd\""
            ));
        }
        lines.push(
            "# 3. The following remote source files that were added to the original project:-"
                .to_string(),
        );

        lines.push("set files [list \\".to_string());
        for file in &local_files {
            lines.push(format!(" \"[file normalize \"{file}\"]\"\\"));
        }
        lines.push("]".to_string());
        lines.push("set imported_files [import_files -fileset sources_1 $files]".to_string());
        lines.push(String::new());

        for bd in &block_designs {
            lines.push(format!("set file \"hdl/{bd}_wrapper.vhd\""));
            lines.push(
                "set file_obj [get_files -of_objects [get_filesets sources_1] [list \"*$file\"]]"
                    .to_string(),
            );
            lines.push("set_property \"library\" \"xil_defaultlib\" $file_obj".to_string());
            lines.push(String::new());
        }

        lines.push("set file_imported [import_files -fileset constrs_1 $file]".to_string());
        lines.extend(extra_lines);
        lines.push("puts \"INFO: Project created:$project_name\"".to_string());

        let mut script = lines.join("\n");
        script.push('\n');
        script
    }
}
