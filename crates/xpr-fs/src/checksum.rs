//! SHA-256 checksum utilities
//!
//! Canonical checksum format (`sha256:<hex>`) used to verify that extracted
//! source files are byte-identical to their workspace originals, and that
//! repeated check-ins produce identical trees.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of in-memory content.
pub fn content_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn file_checksum(path: &Path) -> std::io::Result<String> {
    let content = std::fs::read(path)?;
    Ok(content_checksum(&content))
}

/// Compute a deterministic checksum of an entire directory tree.
///
/// Hashes every regular file's repository-relative path (forward-slash
/// form) together with its contents, in sorted path order, so that two
/// trees with the same shape and bytes produce the same value regardless
/// of directory iteration order.
///
/// # Errors
///
/// Returns an error if the tree cannot be traversed or a file read.
pub fn tree_checksum(root: &Path) -> std::io::Result<String> {
    let mut files = Vec::new();
    collect_files(root, root, &mut files)?;
    files.sort();

    let mut hasher = Sha256::new();
    for rel in files {
        hasher.update(rel.as_bytes());
        hasher.update([0u8]);
        hasher.update(std::fs::read(root.join(&rel))?);
        hasher.update([0u8]);
    }
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out)?;
        } else {
            let rel = path
                .strip_prefix(root)
                .expect("entry is under the traversal root")
                .to_string_lossy()
                .replace('\\', "/");
            out.push(rel);
        }
    }
    Ok(())
}
