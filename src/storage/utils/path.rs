// Path helper utilities shared across storage operations
use std::path::Path;

/// Build a path by joining a root and a child name.
pub fn build_remote_path(base: &str, name: &str) -> String {
    Path::new(base).join(name).to_string_lossy().to_string()
}

/// Final component of a local path, if it has one.
pub fn basename(path: &Path) -> Option<String> {
    path.file_name().map(|s| s.to_string_lossy().to_string())
}

/// Return a new String that guarantees a trailing '/'.
pub fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Whether `name` is a single directory entry: non-empty, no separators,
/// and not a `.` or `..` reference.
pub fn is_single_segment(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && !name.contains("..")
}
