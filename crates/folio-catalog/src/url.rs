//! Relative URL computation between published pages.

/// Compute the shortest relative path from one published URL to another.
///
/// Both URLs are root-relative (`/docs/1.0/page.html`). Directory index
/// URLs end with `/`; extensionless URLs are treated like files. `hash` is
/// appended verbatim and should include its leading `#` when non-empty.
///
/// A target that is not root-relative is returned as-is with the hash
/// appended.
///
/// # Examples
///
/// ```
/// use folio_catalog::compute_relative_url_path;
///
/// assert_eq!(compute_relative_url_path("/a/b/index.html", "/a/b/c/d.html", ""), "c/d.html");
/// assert_eq!(compute_relative_url_path("/a/b/c.html", "/a/x/", ""), "../x/");
/// assert_eq!(compute_relative_url_path("/a/b.html", "/a/b.html", ""), "b.html");
/// assert_eq!(compute_relative_url_path("/a/", "/a/", ""), "./");
/// ```
pub fn compute_relative_url_path(from: &str, to: &str, hash: &str) -> String {
    if to == from {
        if !hash.is_empty() {
            return hash.to_owned();
        }
        return if is_dir(to) {
            "./".to_owned()
        } else {
            basename(to).to_owned()
        };
    }

    if !to.starts_with('/') {
        return format!("{to}{hash}");
    }

    // Appending "." makes a directory URL its own base directory.
    let from_dot = format!("{from}.");
    let mut relative = relative_segments(dirname(&from_dot), to);
    if relative.is_empty() {
        relative.push('.');
    }
    if is_dir(to) {
        format!("{relative}/{hash}")
    } else {
        format!("{relative}{hash}")
    }
}

fn is_dir(url: &str) -> bool {
    url.ends_with('/')
}

/// Normalized path segments: empty and `.` segments dropped, `..` applied.
fn segments(path: &str) -> Vec<&str> {
    let mut segs = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segs.pop();
            }
            _ => segs.push(seg),
        }
    }
    segs
}

/// Last non-empty path segment.
fn basename(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// Everything before the last segment, like POSIX `dirname` (no normalization).
fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(idx) => &trimmed[..idx],
        None if path.starts_with('/') => "/",
        None => ".",
    }
}

/// POSIX relative path between two rooted paths.
fn relative_segments(from: &str, to: &str) -> String {
    let from_segs = segments(from);
    let to_segs = segments(to);

    let common = from_segs
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_segs.len() - common];
    parts.extend_from_slice(&to_segs[common..]);
    parts.join("/")
}
