//! Path segment handling shared by the serializers and the reconstructor
//!
//! Flat lists always use `/`. Paths recorded by other tools (legacy documents, paths
//! typed on Windows) may use either separator, so those are split on both.

/// Split a flat-list entry into its non-empty `/`-separated segments.
pub fn split_flat_path(path: &str) -> Vec<&str> {
    path.trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split a host path on either separator, dropping empty segments and a leading
/// drive designator such as `C:`.
pub fn split_native_path(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = path
        .trim_matches(|c| c == '/' || c == '\\')
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .collect();
    if segments.first().map(|s| is_drive(s)).unwrap_or(false) {
        segments.remove(0);
    }
    segments
}

fn is_drive(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Join a virtual parent path and a child name with `/`.
pub fn join_virtual(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// A segment may be materialized under a destination directory without escaping it.
pub fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}

/// Remove the extension from a file name.
///
/// The extension is the text from the last `.` on, unless that dot belongs to the run of
/// leading dots (`.bashrc` has no extension). `a.tar.gz` becomes `a.tar`.
pub fn strip_extension(name: &str) -> &str {
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name[leading_dots..].rfind('.') {
        Some(idx) => &name[..leading_dots + idx],
        None => name,
    }
}

/// Collapse `.`, `..` and repeated separators without touching the filesystem.
/// The result uses `/`.
pub fn normalize_lexically(path: &str) -> String {
    let absolute = path.starts_with(['/', '\\']);
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            s => parts.push(s),
        }
    }

    let body = parts.join("/");
    if absolute {
        format!("/{}", body)
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

/// Default length cap for generated output names.
pub const MAX_SANITIZED_LEN: usize = 200;

/// Turn an arbitrary path into a readable, filesystem-safe base name.
///
/// `D:\Projects\tree_mark` becomes `D__Projects__tree_mark`.
pub fn sanitize_path_for_filename(path: &str, max_len: usize) -> String {
    let normalized = normalize_lexically(path);
    let without_colons: String = normalized.chars().filter(|c| *c != ':').collect();
    let joined = without_colons.replace('/', "__");

    let mut out = String::with_capacity(joined.len());
    let mut in_run = false;
    for c in joined.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }

    // Only ASCII remains, so byte truncation is char-safe.
    out.truncate(max_len);
    out
}
