use crate::models::NodeRecord;
use crate::page::Page;
use crate::tree::ContentTree;

/// Lazy pre-order walk over the pages below a page
///
/// Content-root subtrees are never entered. Pages below non-page nodes
/// (folders) are still visited. The store is read one level at a time as
/// the iterator advances.
pub struct ChildPages<'t, P> {
    tree: &'t ContentTree,
    stack: Vec<NodeRecord>,
    predicate: P,
}

impl<'t, P> ChildPages<'t, P>
where
    P: Fn(&Page<'t>) -> bool,
{
    pub(crate) fn new(root: &Page<'t>, predicate: P) -> Self {
        let tree = root.tree();
        let mut walk = Self {
            tree,
            stack: Vec::new(),
            predicate,
        };
        walk.push_children(root.path());
        walk
    }

    fn push_children(&mut self, path: &str) {
        let tree = self.tree;
        let content_root_name = tree.config().content_root_name.as_str();
        let children = tree.store().children_of(path);
        self.stack.extend(
            children
                .into_iter()
                .rev()
                .filter(|record| record.name() != content_root_name),
        );
    }
}

impl<'t, P> Iterator for ChildPages<'t, P>
where
    P: Fn(&Page<'t>) -> bool,
{
    type Item = Page<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(record) = self.stack.pop() {
            self.push_children(&record.path);

            if self.tree.is_page_record(&record) {
                let page = Page::new(self.tree, record);
                if (self.predicate)(&page) {
                    return Some(page);
                }
            }
        }
        None
    }
}
