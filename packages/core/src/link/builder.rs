use crate::link::Link;
use crate::node::ContentNode;
use crate::page::{Page, TitleType};
use crate::path;
use std::collections::BTreeMap;

/// Consuming builder for [`Link`]
///
/// Setters take and return the builder; `build` consumes it, so a link can
/// not change after it is built.
///
/// # Examples
///
/// ```rust
/// use sitetree_core::LinkBuilder;
///
/// let link = LinkBuilder::for_path("/content/site/products")
///     .selector("teaser")
///     .extension("html")
///     .suffix("extra")
///     .query_string("x=1")
///     .title("Products")
///     .build();
///
/// assert_eq!(link.href(), "/content/site/products.teaser.html/extra?x=1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    path: String,
    selectors: Vec<String>,
    extension: String,
    suffix: String,
    query_string: String,
    target: Option<String>,
    title: Option<String>,
    properties: BTreeMap<String, String>,
    external: bool,
    active: bool,
    children: Vec<Link>,
}

impl LinkBuilder {
    /// Builder for a literal path, with no extension or classification
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Builder for a node's own path
    ///
    /// Pages get the configured default extension; other nodes get none.
    pub fn for_node(node: &ContentNode<'_>, mapped: bool) -> Self {
        Self::for_node_checked(node, false, mapped)
    }

    /// `for_node`, where `strict` withholds the extension from pages
    /// without a content root
    pub(crate) fn for_node_checked(node: &ContentNode<'_>, strict: bool, mapped: bool) -> Self {
        let tree = node.tree();
        let page_like = node.is_page()
            && (!strict || node.child(&tree.config().content_root_name).is_some());

        let builder = Self::for_node_path(node, mapped);
        // a page mapped onto the site root is linked as `/`
        if page_like && builder.path != "/" {
            builder.extension(tree.config().default_extension.clone())
        } else {
            builder
        }
    }

    /// Builder for a node's path alone, never given an extension
    pub(crate) fn for_node_path(node: &ContentNode<'_>, mapped: bool) -> Self {
        let path = if mapped {
            node.tree().store().map_path(node.path())
        } else {
            node.path().to_string()
        };
        Self::for_path(path)
    }

    /// Builder for a page, titled according to `title_type`
    pub fn for_page(page: &Page<'_>, mapped: bool, title_type: TitleType) -> Self {
        let title = match title_type {
            TitleType::Title => page.title(),
            TitleType::PageTitle => page.page_title(),
            TitleType::NavigationTitle => page.navigation_title(),
        };

        Self::for_node(&page.as_node(), mapped).title(title)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    /// Append a selector; empty selectors are ignored
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        let selector = selector.into();
        if !selector.is_empty() {
            self.selectors.push(selector);
        }
        self
    }

    pub fn selectors<I, S>(self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        selectors
            .into_iter()
            .fold(self, |builder, selector| builder.selector(selector))
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Set the suffix; a missing leading `/` is added
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.suffix = if suffix.is_empty() || suffix.starts_with('/') {
            suffix
        } else {
            format!("/{}", suffix)
        };
        self
    }

    /// Set the query string; a missing leading `?` is added
    pub fn query_string(mut self, query_string: impl Into<String>) -> Self {
        let query_string = query_string.into();
        self.query_string = if query_string.is_empty() || query_string.starts_with('?') {
            query_string
        } else {
            format!("?{}", query_string)
        };
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, child: Link) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Link>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn build(self) -> Link {
        let href = path::compose(
            &self.path,
            &self.selectors,
            &self.extension,
            &self.suffix,
            &self.query_string,
        );

        Link {
            path: self.path,
            selectors: self.selectors,
            extension: self.extension,
            suffix: self.suffix,
            query_string: self.query_string,
            href,
            target: self.target,
            title: self.title,
            properties: self.properties,
            external: self.external,
            active: self.active,
            children: self.children,
        }
    }
}
