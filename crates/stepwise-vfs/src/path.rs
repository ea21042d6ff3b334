//! `/`-separated path helpers shared by the backends and the migration source.
//!
//! Virtual paths are always rooted: `clean("a/b")` is `/a/b`.

/// Path separator used by every virtual filesystem
pub const SEPARATOR: char = '/';

/// Lexically normalize a virtual path.
///
/// Empty and `.` segments are dropped, `..` removes the previous segment and
/// never climbs above the root. The result starts with `/` and has no
/// trailing separator unless it is the root itself.
pub fn clean(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut cleaned = String::with_capacity(path.len() + 1);
    for segment in &segments {
        cleaned.push(SEPARATOR);
        cleaned.push_str(segment);
    }
    if cleaned.is_empty() {
        cleaned.push(SEPARATOR);
    }
    cleaned
}

/// Join `name` onto `base` and clean the result
pub fn join(base: &str, name: &str) -> String {
    clean(&format!("{}{}{}", base, SEPARATOR, name))
}

/// Segments of a cleaned path, root yields none
pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|segment| !segment.is_empty())
}
