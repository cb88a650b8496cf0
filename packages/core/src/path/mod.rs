//! Path Syntax
//!
//! Pure helpers over `/`-separated content paths, plus the decomposition of
//! raw link paths into path, selectors, extension, suffix and query string
//! (see [`syntax`]).

pub mod syntax;

pub use syntax::{compose, decompose, decompose_resolving, PathParts};

use regex::Regex;
use std::sync::LazyLock;

/// URL scheme (`https:`, `mailto:`, ...) or protocol-relative (`//host`) prefix
static URL_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*:|//)").unwrap());

/// Whether `path` is absolute, has no trailing slash (unless it is `/`) and
/// no empty segments
pub fn is_normalized_absolute(path: &str) -> bool {
    if path == "/" {
        return true;
    }
    path.starts_with('/') && path[1..].split('/').all(|segment| !segment.is_empty())
}

/// Last segment of `path` (empty for the root)
pub fn name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Parent path, absent for the root and for single-segment relative paths
pub fn parent_of(path: &str) -> Option<&str> {
    if path == "/" {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some("/"),
        Some(idx) => Some(&path[..idx]),
        None => None,
    }
}

/// Append a relative path to `base`; an empty relative path yields `base`
pub fn join(base: &str, relative: &str) -> String {
    let relative = relative.trim_matches('/');
    if relative.is_empty() {
        base.to_string()
    } else if base == "/" {
        format!("/{}", relative)
    } else {
        format!("{}/{}", base.trim_end_matches('/'), relative)
    }
}

/// Join two relative paths, either of which may be empty
pub fn join_relative(first: &str, second: &str) -> String {
    let first = first.trim_matches('/');
    let second = second.trim_matches('/');
    match (first.is_empty(), second.is_empty()) {
        (true, _) => second.to_string(),
        (_, true) => first.to_string(),
        _ => format!("{}/{}", first, second),
    }
}

/// Path of `path` relative to `base`: `""` when equal, absent when `path`
/// is not `base` or beneath it
pub fn relative_to<'a>(base: &str, path: &'a str) -> Option<&'a str> {
    if path == base {
        return Some("");
    }
    if base == "/" {
        return path.strip_prefix('/');
    }
    path.strip_prefix(base)?.strip_prefix('/')
}

/// Number of segments below the root (`/` is 0, `/content` is 1)
pub fn depth(path: &str) -> usize {
    path.split('/').filter(|segment| !segment.is_empty()).count()
}

/// Strip trailing slashes from the path portion (before any `?`), keeping a
/// lone `/`
pub fn normalize(raw: &str) -> String {
    let (path, query) = match raw.find('?') {
        Some(idx) => raw.split_at(idx),
        None => (raw, ""),
    };
    let trimmed = path.trim_end_matches('/');
    let path = if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    };
    format!("{}{}", path, query)
}

/// Whether `raw` carries a URL scheme or is protocol-relative, i.e. can
/// never name a node in the tree
pub fn is_url(raw: &str) -> bool {
    URL_PREFIX_RE.is_match(raw)
}


#[cfg(test)]
mod syntax_test;
