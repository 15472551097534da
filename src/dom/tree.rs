use crate::dom::analysis::resolve;
use crate::dom::document::{ChildEnumerator, Document, ElementTarget, NodeType};
use crate::error::{InspectorError, Result};
use serde::{Deserialize, Serialize};

/// Element-only mirror of a DOM subtree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementTreeNode {
    /// Always `1` (element)
    pub node_type: u16,

    pub tag_name: String,

    /// Element children, in enumeration order
    #[serde(default)]
    pub child_nodes: Vec<ElementTreeNode>,
}

/// Decides whether a child element (and with it, its subtree) is kept
pub enum TreeFilter<'f, N> {
    /// Keep every element
    All,
    /// Keep elements matching a CSS selector
    Selector(String),
    /// Keep elements the predicate accepts
    Predicate(Box<dyn Fn(&N) -> bool + 'f>),
}

impl<N> Default for TreeFilter<'_, N> {
    fn default() -> Self {
        Self::All
    }
}

impl<'f, N> TreeFilter<'f, N> {
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector(selector.into())
    }

    pub fn predicate(predicate: impl Fn(&N) -> bool + 'f) -> Self {
        Self::Predicate(Box::new(predicate))
    }

    fn accepts<D>(&self, document: &D, node: &N) -> Result<bool>
    where
        D: Document<Node = N> + ?Sized,
    {
        match self {
            Self::All => Ok(true),
            Self::Selector(selector) => document.matches(node, selector),
            Self::Predicate(predicate) => Ok(predicate(node)),
        }
    }
}

impl ElementTreeNode {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Element.code(),
            tag_name: tag_name.into(),
            child_nodes: Vec::new(),
        }
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<ElementTreeNode>) -> Self {
        self.child_nodes = children;
        self
    }

    pub fn add_child(&mut self, child: ElementTreeNode) {
        self.child_nodes.push(child);
    }

    /// Count nodes in this subtree, including self
    pub fn count_nodes(&self) -> usize {
        1 + self.child_nodes.iter().map(ElementTreeNode::count_nodes).sum::<usize>()
    }

    /// Length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        1 + self.child_nodes.iter().map(ElementTreeNode::depth).max().unwrap_or(0)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| InspectorError::DomParseFailed(format!("Failed to serialize element tree: {}", e)))
    }
}

/// Build the element tree rooted at `root`.
///
/// Returns `None` when the root is not an element. Non-element children are
/// pruned; a child rejected by `filter` is dropped together with its whole
/// subtree, so accepted elements below a rejected one never appear.
pub fn element_node_tree_data<D, C>(
    document: &D,
    children: &C,
    root: impl Into<ElementTarget<D::Node>>,
    filter: &TreeFilter<'_, D::Node>,
) -> Result<Option<ElementTreeNode>>
where
    D: Document + ?Sized,
    C: ChildEnumerator<D> + ?Sized,
{
    let root = resolve(document, root.into())?;
    if !document.node_type(&root)?.is_element() {
        return Ok(None);
    }
    build_element(document, children, &root, filter)
}

/// Build the record for a node already known to be an element; each child's
/// node type is read exactly once
fn build_element<D, C>(
    document: &D,
    children: &C,
    element: &D::Node,
    filter: &TreeFilter<'_, D::Node>,
) -> Result<Option<ElementTreeNode>>
where
    D: Document + ?Sized,
    C: ChildEnumerator<D> + ?Sized,
{
    let mut tree_node = ElementTreeNode::new(document.tag_name(element)?);

    for child in children.children(document, element)? {
        // Filter first: a rejected child's subtree is never kept, so skip walking it.
        if !document.node_type(&child)?.is_element() || !filter.accepts(document, &child)? {
            continue;
        }
        if let Some(child_node) = build_element(document, children, &child, filter)? {
            tree_node.add_child(child_node);
        }
    }

    Ok(Some(tree_node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::document::{LightChildren, ShadowIncludingChildren};
    use crate::dom::snapshot::{PageSnapshot, SnapshotNode};

    fn tags(node: &ElementTreeNode) -> Vec<&str> {
        node.child_nodes.iter().map(|c| c.tag_name.as_str()).collect()
    }

    #[test]
    fn test_text_only_root() {
        let page = PageSnapshot::parse("<html><body><p id='root'>just <!-- note --> text</p></body></html>");
        let tree = element_node_tree_data(&page, &LightChildren, "#root", &TreeFilter::All)
            .unwrap()
            .unwrap();

        assert_eq!(tree, ElementTreeNode::new("P"));
        assert_eq!(tree.node_type, 1);
    }

    #[test]
    fn test_nested_children_in_document_order() {
        let page = PageSnapshot::parse(
            "<html><body><div id='root'>text<section><h1>a</h1><h2>b</h2></section><ul><li>x</li></ul></div></body></html>",
        );
        let tree = element_node_tree_data(&page, &LightChildren, "#root", &TreeFilter::All)
            .unwrap()
            .unwrap();

        assert_eq!(tags(&tree), vec!["SECTION", "UL"]);
        assert_eq!(tags(&tree.child_nodes[0]), vec!["H1", "H2"]);
        assert_eq!(tags(&tree.child_nodes[1]), vec!["LI"]);
        assert_eq!(tree.count_nodes(), 6);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_selector_filter_rejects_child() {
        let page = PageSnapshot::parse("<html><body><div id='root'><span></span><em></em></div></body></html>");
        let filter = TreeFilter::selector(":not(em)");
        let tree = element_node_tree_data(&page, &LightChildren, "#root", &filter)
            .unwrap()
            .unwrap();

        assert_eq!(tags(&tree), vec!["SPAN"]);
    }

    #[test]
    fn test_predicate_filter_rejects_child() {
        let page = PageSnapshot::parse("<html><body><div id='root'><span></span><em></em></div></body></html>");
        let filter = TreeFilter::predicate(|node: &SnapshotNode| page.tag_name(node).map(|t| t != "EM").unwrap_or(false));
        let tree = element_node_tree_data(&page, &LightChildren, "#root", &filter)
            .unwrap()
            .unwrap();

        assert_eq!(tags(&tree), vec!["SPAN"]);
    }

    #[test]
    fn test_rejected_child_drops_accepted_descendants() {
        let page = PageSnapshot::parse(
            "<html><body><div id='root'><div class='skip'><p class='keep'></p></div><p class='keep'></p></div></body></html>",
        );
        let filter = TreeFilter::selector(".keep");
        let tree = element_node_tree_data(&page, &LightChildren, "#root", &filter)
            .unwrap()
            .unwrap();

        assert_eq!(tags(&tree), vec!["P"]);
        assert!(tree.child_nodes[0].child_nodes.is_empty());
    }

    #[test]
    fn test_root_is_not_filtered() {
        let page = PageSnapshot::parse("<html><body><div id='root'><b></b></div></body></html>");
        let filter = TreeFilter::selector("b");
        let tree = element_node_tree_data(&page, &LightChildren, "#root", &filter)
            .unwrap()
            .unwrap();

        assert_eq!(tree.tag_name, "DIV");
        assert_eq!(tags(&tree), vec!["B"]);
    }

    #[test]
    fn test_non_element_root() {
        let page = PageSnapshot::parse("<html><body><p id='root'>text</p></body></html>");
        let p = page.query_selector("#root").unwrap().unwrap();
        let text = page.child_nodes(&p).unwrap().remove(0);

        let tree = element_node_tree_data(&page, &LightChildren, ElementTarget::Node(text), &TreeFilter::All).unwrap();
        assert!(tree.is_none());
    }

    #[test]
    fn test_missing_root_selector() {
        let page = PageSnapshot::parse("<html><body></body></html>");
        let result = element_node_tree_data(&page, &LightChildren, "#nope", &TreeFilter::All);
        assert!(matches!(result, Err(InspectorError::ElementNotFound(_))));
    }

    #[test]
    fn test_shadow_including_children() {
        let page = PageSnapshot::parse(
            r#"<html><body><x-card id="root"><template shadowrootmode="open"><header></header><slot></slot></template><p>light</p></x-card></body></html>"#,
        );

        let light = element_node_tree_data(&page, &LightChildren, "#root", &TreeFilter::All)
            .unwrap()
            .unwrap();
        assert_eq!(tags(&light), vec!["P"]);

        let composed = element_node_tree_data(&page, &ShadowIncludingChildren, "#root", &TreeFilter::All)
            .unwrap()
            .unwrap();
        assert_eq!(tags(&composed), vec!["HEADER", "SLOT", "P"]);
    }

    /// Snapshot wrapper counting node type lookups
    struct CountingDocument<'a> {
        page: &'a PageSnapshot,
        node_type_calls: std::cell::Cell<usize>,
    }

    impl Document for CountingDocument<'_> {
        type Node = SnapshotNode;

        fn query_selector(&self, selector: &str) -> Result<Option<SnapshotNode>> {
            self.page.query_selector(selector)
        }

        fn query_selector_all(&self, scope: &SnapshotNode, selector: &str) -> Result<Vec<SnapshotNode>> {
            self.page.query_selector_all(scope, selector)
        }

        fn element_from_point(&self, point: crate::dom::element::Point) -> Result<Option<SnapshotNode>> {
            self.page.element_from_point(point)
        }

        fn node_type(&self, node: &SnapshotNode) -> Result<NodeType> {
            self.node_type_calls.set(self.node_type_calls.get() + 1);
            self.page.node_type(node)
        }

        fn tag_name(&self, node: &SnapshotNode) -> Result<String> {
            self.page.tag_name(node)
        }

        fn attributes(&self, node: &SnapshotNode) -> Result<indexmap::IndexMap<String, String>> {
            self.page.attributes(node)
        }

        fn bounding_rect(&self, node: &SnapshotNode) -> Result<crate::dom::element::Rect> {
            self.page.bounding_rect(node)
        }

        fn child_nodes(&self, node: &SnapshotNode) -> Result<Vec<SnapshotNode>> {
            self.page.child_nodes(node)
        }

        fn shadow_child_nodes(&self, node: &SnapshotNode) -> Result<Option<Vec<SnapshotNode>>> {
            self.page.shadow_child_nodes(node)
        }

        fn matches(&self, node: &SnapshotNode, selector: &str) -> Result<bool> {
            self.page.matches(node, selector)
        }
    }

    #[test]
    fn test_node_type_read_once_per_node() {
        // root, p, i, the text node, b
        let page = PageSnapshot::parse("<html><body><div id='root'><p>t<b></b></p><i></i></div></body></html>");
        let document = CountingDocument { page: &page, node_type_calls: std::cell::Cell::new(0) };

        let tree = element_node_tree_data(&document, &LightChildren, "#root", &TreeFilter::All)
            .unwrap()
            .unwrap();

        assert_eq!(tree.count_nodes(), 4);
        assert_eq!(document.node_type_calls.get(), 5);
    }

    #[test]
    fn test_tree_json_shape() {
        let tree = ElementTreeNode::new("UL").with_children(vec![ElementTreeNode::new("LI")]);
        let value = serde_json::to_value(&tree).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "nodeType": 1,
                "tagName": "UL",
                "childNodes": [{ "nodeType": 1, "tagName": "LI", "childNodes": [] }]
            })
        );
        assert!(tree.to_json().unwrap().contains("\"childNodes\""));
    }
}
