//! Vivado process integration
//!
//! The rewriting core treats Vivado as an opaque subprocess: this crate
//! wraps the two invocations the manager needs — exporting a project's
//! reconstruction script and replaying a portable script — plus the
//! environment preflight that pins the tool version.

pub mod error;
pub mod preflight;
pub mod tool;

pub use error::{Error, Result};
pub use preflight::verify_environment;
pub use tool::VivadoTool;
