//! Path utilities
//!
//! Pure helpers for the `/`-delimited paths that key every node. Hierarchy is
//! never stored; it is recovered from these string relationships.

use crate::error::FsError;
use std::collections::HashSet;

/// The implicit root every top-level node hangs from.
pub const ROOT: &str = "/";

/// Split a path into its non-empty segments (`/a//b/` → `["a", "b"]`).
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Last segment of a path, or `/` for the root itself.
pub fn name_of(path: &str) -> &str {
    segments(path).last().copied().unwrap_or(ROOT)
}

/// Everything before the last `/`. Top-level paths have the root as parent.
pub fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => ROOT,
        Some(idx) => &path[..idx],
    }
}

/// Join a parent path and a child name.
pub fn join(parent: &str, name: &str) -> String {
    if parent == ROOT || parent.is_empty() {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// True when `candidate` is `ancestor` or lies beneath it.
pub fn is_descendant_or_self(candidate: &str, ancestor: &str) -> bool {
    match candidate.strip_prefix(ancestor) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Replace the leading `old_prefix` of `path` with `new_prefix`.
///
/// Returns `None` when `path` is not `old_prefix` or one of its descendants.
pub fn rebase(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    if !is_descendant_or_self(path, old_prefix) {
        return None;
    }
    Some(format!("{}{}", new_prefix, &path[old_prefix.len()..]))
}

/// Derive a collision-free sibling of `desired`.
///
/// `desired` is returned unchanged when free. Otherwise ` (copy)` is inserted
/// before the extension (the last `.` of the final segment), or appended when
/// the name has no `.`; further collisions try ` (copy 2)`, ` (copy 3)`, ...
pub fn unique_sibling(desired: &str, existing: &HashSet<String>) -> String {
    if !existing.contains(desired) {
        return desired.to_string();
    }

    let (directory, base_name) = match desired.rfind('/') {
        Some(idx) => (&desired[..idx], &desired[idx + 1..]),
        None => ("", desired),
    };
    let (stem, extension) = match base_name.rfind('.') {
        Some(idx) => (&base_name[..idx], &base_name[idx..]),
        None => (base_name, ""),
    };
    let candidate = |suffix: &str| format!("{}/{}{}{}", directory, stem, suffix, extension);

    let mut path = candidate(" (copy)");
    let mut count = 2;
    while existing.contains(&path) {
        path = candidate(&format!(" (copy {})", count));
        count += 1;
    }
    path
}

/// Check that a path is absolute and made of non-empty segments.
pub fn validate_path(path: &str) -> Result<(), FsError> {
    if !path.starts_with('/') {
        return Err(FsError::InvalidPath(format!(
            "'{}' must be absolute (start with '/')",
            path
        )));
    }
    if path == ROOT {
        return Err(FsError::InvalidPath(
            "the root '/' cannot be addressed as a node".to_string(),
        ));
    }
    for segment in path[1..].split('/') {
        if segment.trim().is_empty() {
            return Err(FsError::InvalidPath(format!(
                "'{}' contains an empty segment",
                path
            )));
        }
        if segment == "." || segment == ".." {
            return Err(FsError::InvalidPath(format!(
                "'{}' contains a relative segment",
                path
            )));
        }
    }
    Ok(())
}

/// Check that a name can stand as a single path segment.
pub fn validate_name(name: &str) -> Result<(), FsError> {
    if name.trim().is_empty() {
        return Err(FsError::InvalidPath("name cannot be empty".to_string()));
    }
    if name.contains('/') {
        return Err(FsError::InvalidPath(format!(
            "name '{}' cannot contain '/'",
            name
        )));
    }
    if name == "." || name == ".." {
        return Err(FsError::InvalidPath(format!("'{}' is not a valid name", name)));
    }
    Ok(())
}
