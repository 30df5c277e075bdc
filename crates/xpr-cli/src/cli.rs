//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Vivado project manager - keep tool-managed projects in version control
#[derive(Parser, Debug)]
#[command(name = "xpr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check every workspace project into the sources tree
    ///
    /// Exports each project's reconstruction TCL from Vivado, rewrites it
    /// into a portable, repository-relative script, and extracts the
    /// referenced source files into sources/<project>/.
    Checkin {
        /// Skip the Vivado version preflight check
        #[arg(long)]
        skip_version_check: bool,
    },

    /// Rebuild the workspace from checked-in project scripts
    ///
    /// Moves any existing workspace/ to workspace.bak and replays every
    /// sources/<project>.tcl through Vivado in batch mode.
    Checkout {
        /// Skip the Vivado version preflight check
        #[arg(long)]
        skip_version_check: bool,
    },

    /// List projects and their check-in state
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
