//! Pages
//!
//! A `Page` is a node of the configured page type. Its renderable
//! properties and components live under one reserved child, the content
//! root (`jcr:content` by default); its other page children are sibling
//! pages in the page hierarchy, not components.
//!
//! Page properties (titles, template, navigation flags, on/off times) are
//! read from the content root. A page without a content root has no
//! properties and is never displayable.

mod iter;
mod navigation;

pub use iter::ChildPages;
pub use navigation::NavigationOptions;

use crate::error::Result;
use crate::inheritance;
use crate::link::{Link, LinkBuilder};
use crate::models::{names, FromProperty, NodeRecord, PropertyValue};
use crate::node::ContentNode;
use crate::path;
use crate::search::predicates;
use crate::tree::ContentTree;
use chrono::{DateTime, Utc};
use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Which title a page link carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TitleType {
    #[default]
    Title,
    PageTitle,
    NavigationTitle,
}

impl TitleType {
    /// Content-root property holding this title
    pub fn property_name(self) -> &'static str {
        match self {
            TitleType::Title => names::TITLE,
            TitleType::PageTitle => names::PAGE_TITLE,
            TitleType::NavigationTitle => names::NAVIGATION_TITLE,
        }
    }
}

/// Child page selection for [`Page::children_filtered`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildFilter {
    #[default]
    All,
    /// Pages with a content root that are not hidden from navigation
    DisplayableOnly,
}

/// Read-only view of a page
#[derive(Clone)]
pub struct Page<'t> {
    tree: &'t ContentTree,
    record: NodeRecord,
    content_root: OnceCell<Option<ContentNode<'t>>>,
}

impl<'t> Page<'t> {
    pub(crate) fn new(tree: &'t ContentTree, record: NodeRecord) -> Self {
        Self {
            tree,
            record,
            content_root: OnceCell::new(),
        }
    }

    pub fn tree(&self) -> &'t ContentTree {
        self.tree
    }

    pub fn record(&self) -> &NodeRecord {
        &self.record
    }

    pub fn path(&self) -> &str {
        &self.record.path
    }

    pub fn name(&self) -> &str {
        self.record.name()
    }

    /// The page node itself (not its content root)
    pub fn as_node(&self) -> ContentNode<'t> {
        ContentNode::new(self.tree, self.record.clone())
    }

    // Hierarchy

    /// Nearest ancestor page
    pub fn parent(&self) -> Option<Page<'t>> {
        path::parent_of(self.path()).and_then(|parent| self.tree.containing_page(parent))
    }

    /// Ancestor page `level` steps up (`0` is this page)
    pub fn parent_at(&self, level: usize) -> Option<Page<'t>> {
        (0..level).try_fold(self.clone(), |page, _| page.parent())
    }

    /// Page on this page's path at absolute `level` (`0` is the first
    /// segment below `/`)
    pub fn absolute_parent(&self, level: usize) -> Option<Page<'t>> {
        let segments: Vec<&str> = self.path().split('/').filter(|s| !s.is_empty()).collect();
        if level >= segments.len() {
            return None;
        }
        self.tree
            .page(&format!("/{}", segments[..=level].join("/")))
    }

    /// Number of path segments below `/`
    pub fn depth(&self) -> usize {
        path::depth(self.path())
    }

    pub fn child(&self, name: &str) -> Option<Page<'t>> {
        if name.is_empty() || name.contains('/') {
            return None;
        }
        self.tree.page(&path::join(self.path(), name))
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Direct child pages in stored order
    pub fn children(&self) -> Vec<Page<'t>> {
        self.tree
            .store()
            .children_of(self.path())
            .into_iter()
            .filter(|record| self.tree.is_page_record(record))
            .map(|record| Page::new(self.tree, record))
            .collect()
    }

    pub fn children_filtered(&self, filter: ChildFilter) -> Vec<Page<'t>> {
        match filter {
            ChildFilter::All => self.children(),
            ChildFilter::DisplayableOnly => self.children_matching(predicates::displayable()),
        }
    }

    pub fn children_matching<P>(&self, predicate: P) -> Vec<Page<'t>>
    where
        P: Fn(&Page<'t>) -> bool,
    {
        self.children()
            .into_iter()
            .filter(|page| predicate(page))
            .collect()
    }

    /// Lazy pre-order iterator over every page below this one
    pub fn child_pages_deep<P>(&self, predicate: P) -> ChildPages<'t, P>
    where
        P: Fn(&Page<'t>) -> bool,
    {
        ChildPages::new(self, predicate)
    }

    /// Every page below this one matching `predicate`, in pre-order
    pub fn find_descendants<P>(&self, predicate: P) -> Vec<Page<'t>>
    where
        P: Fn(&Page<'t>) -> bool,
    {
        self.child_pages_deep(predicate).collect()
    }

    /// Nearest page (this page first unless excluded) matching `predicate`
    pub fn find_ancestor<P>(&self, predicate: P, exclude_current: bool) -> Option<Page<'t>>
    where
        P: Fn(&Page<'t>) -> bool,
    {
        inheritance::find_ancestor_page(self, predicate, exclude_current)
    }

    /// Nearest page whose content root defines `name`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty property name.
    pub fn find_ancestor_with_property(
        &self,
        name: &str,
        exclude_current: bool,
    ) -> Result<Option<Page<'t>>> {
        let predicate = predicates::property_exists(name)?;
        Ok(self.find_ancestor(
            |page| page.content_root().is_some_and(|content| predicate(content)),
            exclude_current,
        ))
    }

    /// Nearest page whose content root's `name` equals `value`
    pub fn find_ancestor_with_property_value(
        &self,
        name: &str,
        value: impl Into<PropertyValue>,
        exclude_current: bool,
    ) -> Result<Option<Page<'t>>> {
        let predicate = predicates::property_equals(name, value)?;
        Ok(self.find_ancestor(
            |page| page.content_root().is_some_and(|content| predicate(content)),
            exclude_current,
        ))
    }

    // Content

    /// The page's content root, read once per instance
    pub fn content_root(&self) -> Option<&ContentNode<'t>> {
        self.content_root
            .get_or_init(|| {
                self.tree
                    .node(&self.tree.content_root_path(self.path()))
            })
            .as_ref()
    }

    /// Node at `relative_path` under the content root (the content root
    /// itself for an empty path)
    pub fn component(&self, relative_path: &str) -> Option<ContentNode<'t>> {
        let content_root = self.content_root()?;
        if relative_path.trim_matches('/').is_empty() {
            Some(content_root.clone())
        } else {
            content_root.child(relative_path)
        }
    }

    pub fn has_content(&self) -> bool {
        self.content_root().is_some()
    }

    /// Content-root property `name` as `T`, or `default`
    pub fn get<T: FromProperty>(&self, name: &str, default: T) -> T {
        self.get_typed(name).unwrap_or(default)
    }

    pub fn get_typed<T: FromProperty>(&self, name: &str) -> Option<T> {
        self.content_root()
            .and_then(|content| content.get_typed(name))
    }

    pub fn get_inherited_typed<T: FromProperty>(&self, name: &str) -> Option<T> {
        self.content_root()
            .and_then(|content| content.get_inherited_typed(name))
    }

    /// Inherited node at `relative_path` under the content root
    pub fn component_inherited(&self, relative_path: &str) -> Option<ContentNode<'t>> {
        inheritance::resolve(self, relative_path, false)
    }

    // Titles

    /// `jcr:title`, falling back to the page name
    pub fn title(&self) -> String {
        self.trimmed(names::TITLE)
            .unwrap_or_else(|| self.name().to_string())
    }

    /// `pageTitle`, falling back to [`Page::title`]
    pub fn page_title(&self) -> String {
        self.trimmed(names::PAGE_TITLE)
            .unwrap_or_else(|| self.title())
    }

    /// `navTitle`, falling back to [`Page::page_title`]
    pub fn navigation_title(&self) -> String {
        self.trimmed(names::NAVIGATION_TITLE)
            .unwrap_or_else(|| self.page_title())
    }

    /// Stored title of the given type, without fallback
    pub fn title_of(&self, title_type: TitleType) -> Option<String> {
        self.get_typed(title_type.property_name())
    }

    pub fn description(&self) -> Option<String> {
        self.get_typed(names::DESCRIPTION)
    }

    fn trimmed(&self, name: &str) -> Option<String> {
        self.get_typed::<String>(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    // Metadata

    pub fn template_path(&self) -> Option<String> {
        self.get_typed(names::TEMPLATE)
    }

    pub fn is_hide_in_nav(&self) -> bool {
        self.get(names::HIDE_IN_NAV, false)
    }

    /// Has a content root and is not hidden from navigation
    pub fn is_displayable(&self) -> bool {
        self.has_content() && !self.is_hide_in_nav()
    }

    pub fn vanity_url(&self) -> Option<String> {
        self.get_typed(names::VANITY_PATH)
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.get_typed(names::LAST_MODIFIED)
    }

    pub fn on_time(&self) -> Option<DateTime<Utc>> {
        self.get_typed(names::ON_TIME)
    }

    pub fn off_time(&self) -> Option<DateTime<Utc>> {
        self.get_typed(names::OFF_TIME)
    }

    /// Whether `now` falls inside the optional on/off window
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        let after_on = self.on_time().map_or(true, |on| now >= on);
        let before_off = self.off_time().map_or(true, |off| now < off);
        after_on && before_off
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Link for the `redirectTarget` property
    pub fn redirect_target(&self) -> Option<Link> {
        self.content_root()
            .and_then(|content| content.get_as_link(names::REDIRECT_TARGET, true, false))
    }

    // Links

    pub fn link_builder(&self, title_type: TitleType, mapped: bool) -> LinkBuilder {
        LinkBuilder::for_page(self, mapped, title_type)
    }

    pub fn link_with_title(&self, title_type: TitleType, mapped: bool) -> Link {
        self.link_builder(title_type, mapped).build()
    }

    pub fn link(&self, mapped: bool) -> Link {
        self.link_with_title(TitleType::Title, mapped)
    }

    pub fn href(&self, mapped: bool) -> String {
        self.link(mapped).href().to_string()
    }
}

impl PartialEq for Page<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.path() == other.path()
    }
}

impl Eq for Page<'_> {}

impl Hash for Page<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path().hash(state);
    }
}

impl fmt::Debug for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("path", &self.record.path)
            .field("title", &self.title())
            .finish()
    }
}
