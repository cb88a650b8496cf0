//! Raw path decomposition
//!
//! A raw content path has the shape
//! `path[.selector1.selector2...][.extension][/suffix][?query]`.
//!
//! Grammar, applied left to right:
//!
//! 1. Everything from the first `?` on is the query string, kept verbatim.
//! 2. Trailing slashes on the remainder are dropped (`/` stays `/`).
//! 3. Segments are scanned from the root. The first segment containing a
//!    `.` whose last dot-token is a known extension ends the node path; its
//!    remaining dot-tokens are the selectors; every later segment is the
//!    suffix. A segment that names an existing node in full is skipped, and
//!    within the dotted segment the longest dotted prefix naming an existing
//!    node is taken as the node name (`archive.2024.teaser.html` under an
//!    existing `archive.2024` node yields selectors `["teaser"]`).
//! 4. Without such a segment the whole remainder is the path.
//!
//! Tokens that are not in the known-extension list (`2024` in
//! `archive.2024`) never count as an extension.

use crate::config::TreeConfig;
use crate::error::{Result, TreeError};

/// Decomposed form of a raw content path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParts {
    pub path: String,
    pub selectors: Vec<String>,
    pub extension: String,
    /// Empty or starting with `/`
    pub suffix: String,
    /// Empty or starting with `?`
    pub query_string: String,
}

impl PathParts {
    /// Recompose into an href
    pub fn compose(&self) -> String {
        compose(
            &self.path,
            &self.selectors,
            &self.extension,
            &self.suffix,
            &self.query_string,
        )
    }
}

/// Decompose using only the syntax and the known-extension list
pub fn decompose(raw: &str, config: &TreeConfig) -> Result<PathParts> {
    decompose_resolving(raw, config, |_| false)
}

/// Decompose, consulting `exists` to keep dotted node names intact
pub fn decompose_resolving<F>(raw: &str, config: &TreeConfig, exists: F) -> Result<PathParts>
where
    F: Fn(&str) -> bool,
{
    if raw.trim().is_empty() {
        return Err(TreeError::malformed_path(raw, "path is empty"));
    }

    let (path_part, query_string) = match raw.find('?') {
        Some(idx) => (&raw[..idx], raw[idx..].to_string()),
        None => (raw, String::new()),
    };

    if path_part.is_empty() {
        return Err(TreeError::malformed_path(raw, "no path before query string"));
    }

    let trimmed = path_part.trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(PathParts {
            path: "/".to_string(),
            query_string,
            ..Default::default()
        });
    }

    let segments: Vec<&str> = trimmed.split('/').collect();

    for (idx, segment) in segments.iter().enumerate() {
        let tokens: Vec<&str> = segment.split('.').collect();
        if tokens.len() < 2 || tokens[0].is_empty() {
            continue;
        }

        let extension = tokens[tokens.len() - 1];
        if !config.is_known_extension(extension) {
            continue;
        }

        let prefix = segments[..idx].join("/");
        let node_path = |name: &str| {
            if idx == 0 {
                name.to_string()
            } else if prefix.is_empty() {
                format!("/{}", name)
            } else {
                format!("{}/{}", prefix, name)
            }
        };

        if exists(&node_path(*segment)) {
            continue;
        }

        let name_len = (1..tokens.len())
            .rev()
            .find(|&len| exists(&node_path(&tokens[..len].join("."))))
            .unwrap_or(1);

        let selectors: Vec<String> = tokens[name_len..tokens.len() - 1]
            .iter()
            .map(|token| token.to_string())
            .collect();

        if selectors.iter().any(|selector| selector.is_empty()) {
            return Err(TreeError::malformed_path(raw, "empty selector"));
        }

        let suffix = if idx + 1 < segments.len() {
            format!("/{}", segments[idx + 1..].join("/"))
        } else {
            String::new()
        };

        return Ok(PathParts {
            path: node_path(&tokens[..name_len].join(".")),
            selectors,
            extension: extension.to_string(),
            suffix,
            query_string,
        });
    }

    Ok(PathParts {
        path: trimmed.to_string(),
        query_string,
        ..Default::default()
    })
}

/// Compose an href from its parts
///
/// Selectors are joined with `.` and prefixed with `.`; the extension is
/// prefixed with `.` when non-empty; a suffix gains a leading `/` if it
/// lacks one; the query string is appended verbatim.
pub fn compose(
    path: &str,
    selectors: &[String],
    extension: &str,
    suffix: &str,
    query_string: &str,
) -> String {
    let mut href = String::with_capacity(path.len() + suffix.len() + query_string.len() + 16);
    href.push_str(path);

    for selector in selectors {
        href.push('.');
        href.push_str(selector);
    }

    if !extension.is_empty() {
        href.push('.');
        href.push_str(extension);
    }

    if !suffix.is_empty() {
        if !suffix.starts_with('/') {
            href.push('/');
        }
        href.push_str(suffix);
    }

    href.push_str(query_string);
    href
}
