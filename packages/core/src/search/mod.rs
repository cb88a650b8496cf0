//! Tree Search
//!
//! Predicate-driven traversal over the raw node tree. Unlike
//! [`crate::inheritance`], these walks are not page-aware: `find_ancestor`
//! follows ordinary parent links and `find_descendants` visits every node
//! below the start node.
//!
//! Predicates are plain closures; [`predicates`] provides the common ones.

pub mod predicates;

use crate::node::ContentNode;
use std::time::Instant;

/// Nearest node on the parent chain (starting at `node` unless excluded)
/// matching `predicate`
pub fn find_ancestor<'t, P>(
    node: &ContentNode<'t>,
    predicate: P,
    exclude_current: bool,
) -> Option<ContentNode<'t>>
where
    P: Fn(&ContentNode<'t>) -> bool,
{
    let mut current = if exclude_current {
        node.parent()
    } else {
        Some(node.clone())
    };

    while let Some(candidate) = current {
        if predicate(&candidate) {
            return Some(candidate);
        }
        current = candidate.parent();
    }

    None
}

/// Every node below `node` matching `predicate`, in pre-order
///
/// The start node itself is not a candidate.
pub fn find_descendants<'t, P>(node: &ContentNode<'t>, predicate: P) -> Vec<ContentNode<'t>>
where
    P: Fn(&ContentNode<'t>) -> bool,
{
    let started = Instant::now();
    let mut found = Vec::new();

    let mut stack: Vec<ContentNode<'t>> = node.children().into_iter().rev().collect();
    while let Some(current) = stack.pop() {
        stack.extend(current.children().into_iter().rev());
        if predicate(&current) {
            found.push(current);
        }
    }

    tracing::debug!(
        root = node.path(),
        results = found.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "find_descendants completed"
    );
    found
}

impl<'t> ContentNode<'t> {
    /// See [`find_ancestor`]
    pub fn find_ancestor<P>(&self, predicate: P, exclude_current: bool) -> Option<ContentNode<'t>>
    where
        P: Fn(&ContentNode<'t>) -> bool,
    {
        find_ancestor(self, predicate, exclude_current)
    }

    /// See [`find_descendants`]
    pub fn find_descendants<P>(&self, predicate: P) -> Vec<ContentNode<'t>>
    where
        P: Fn(&ContentNode<'t>) -> bool,
    {
        find_descendants(self, predicate)
    }
}
