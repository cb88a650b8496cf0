use crate::link::Link;
use crate::page::{ChildFilter, Page, TitleType};
use crate::path;
use serde::{Deserialize, Serialize};

/// Options for [`Page::navigation_tree`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationOptions {
    /// Levels of child links below the starting page (clamped to the
    /// configured navigation depth limit)
    pub depth: usize,

    /// Skip child pages without content or hidden from navigation
    pub displayable_only: bool,

    /// Path of the page being rendered; links at or above it are active
    pub active_path: Option<String>,

    /// Pass link paths through the store's path mapping
    pub mapped: bool,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            depth: 1,
            displayable_only: true,
            active_path: None,
            mapped: false,
        }
    }
}

impl NavigationOptions {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_active_path(mut self, active_path: impl Into<String>) -> Self {
        self.active_path = Some(active_path.into());
        self
    }

    pub fn include_hidden(mut self) -> Self {
        self.displayable_only = false;
        self
    }

    pub fn mapped(mut self, mapped: bool) -> Self {
        self.mapped = mapped;
        self
    }

    fn is_active(&self, page_path: &str) -> bool {
        self.active_path
            .as_deref()
            .is_some_and(|active| path::relative_to(page_path, active).is_some())
    }
}

impl<'t> Page<'t> {
    /// Link titled with the navigation title
    pub fn navigation_link(&self, active: bool, mapped: bool) -> Link {
        self.link_builder(TitleType::NavigationTitle, mapped)
            .active(active)
            .build()
    }

    /// Navigation link for this page with child page links nested
    /// `options.depth` levels deep
    pub fn navigation_tree(&self, options: &NavigationOptions) -> Link {
        let limit = self.tree().config().navigation_depth_limit;
        let depth = options.depth.min(limit);
        if options.depth > limit {
            tracing::debug!(
                requested = options.depth,
                limit,
                "navigation depth clamped"
            );
        }
        self.navigation_level(options, depth)
    }

    fn navigation_level(&self, options: &NavigationOptions, remaining: usize) -> Link {
        let filter = if options.displayable_only {
            ChildFilter::DisplayableOnly
        } else {
            ChildFilter::All
        };

        let children: Vec<Link> = if remaining == 0 {
            Vec::new()
        } else {
            self.children_filtered(filter)
                .iter()
                .map(|child| child.navigation_level(options, remaining - 1))
                .collect()
        };

        self.link_builder(TitleType::NavigationTitle, options.mapped)
            .active(options.is_active(self.path()))
            .children(children)
            .build()
    }
}
