//! Path helpers shared by the session controller and the in-memory backend.
//!
//! Host paths are opaque strings; these helpers only split on `/` and `\` and never touch a
//! real filesystem.

/// Normalizes a virtual filesystem path.
///
/// Trims whitespace, converts backslashes to `/`, resolves `.`/`..`, ensures a leading slash,
/// and returns `/` for empty or fully-collapsed paths.
pub fn normalize_virtual_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let mut out = String::new();
    for segment in trimmed.replace('\\', "/").split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            if let Some(idx) = out.rfind('/') {
                out.truncate(idx);
            }
            continue;
        }
        out.push('/');
        out.push_str(segment);
    }

    if out.is_empty() {
        "/".to_string()
    } else {
        out
    }
}

/// Returns the normalized parent of `path` (`/` for top-level entries and the root).
pub fn parent_path(path: &str) -> String {
    let normalized = normalize_virtual_path(path);
    match normalized.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => normalized[..idx].to_string(),
    }
}

/// Joins a child name onto a normalized directory path.
pub fn join_path(dir: &str, name: &str) -> String {
    let dir = normalize_virtual_path(dir);
    if dir == "/" {
        normalize_virtual_path(&format!("/{name}"))
    } else {
        normalize_virtual_path(&format!("{dir}/{name}"))
    }
}

/// Returns the last segment of a host path, splitting on `/` or `\`.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Returns the text after the last `.` of the last path segment, or `None` without a dot.
pub fn trailing_suffix(path: &str) -> Option<&str> {
    file_name_of(path)
        .rsplit_once('.')
        .map(|(_, suffix)| suffix)
}

/// Returns the lower-cased extension (with leading dot) the host reports for a file name.
pub fn extension_of(name: &str) -> Option<String> {
    match name.rsplit_once('.') {
        Some((stem, suffix)) if !stem.is_empty() && !suffix.is_empty() => {
            Some(format!(".{}", suffix.to_lowercase()))
        }
        _ => None,
    }
}
