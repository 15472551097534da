use crate::dom::element::{Point, Rect};
use crate::error::Result;
use indexmap::IndexMap;
use std::fmt;

/// DOM node type codes, as exposed by `Node.nodeType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    pub fn from_code(code: u16) -> Option<Self> {
        let node_type = match code {
            1 => Self::Element,
            2 => Self::Attribute,
            3 => Self::Text,
            4 => Self::CdataSection,
            5 => Self::EntityReference,
            6 => Self::Entity,
            7 => Self::ProcessingInstruction,
            8 => Self::Comment,
            9 => Self::Document,
            10 => Self::DocumentType,
            11 => Self::DocumentFragment,
            12 => Self::Notation,
            _ => return None,
        };
        Some(node_type)
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn is_element(self) -> bool {
        self == Self::Element
    }
}

/// Read-only access to a document and its layout.
///
/// Implementations hand out cheap, cloneable node handles; every query runs
/// against the live state of the document at call time.
pub trait Document {
    type Node: Clone + fmt::Debug;

    /// First element matching `selector` in document order
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Node>>;

    /// All descendants of `scope` matching `selector`, in document order
    fn query_selector_all(&self, scope: &Self::Node, selector: &str) -> Result<Vec<Self::Node>>;

    /// Topmost element at a viewport coordinate
    fn element_from_point(&self, point: Point) -> Result<Option<Self::Node>>;

    fn node_type(&self, node: &Self::Node) -> Result<NodeType>;

    fn tag_name(&self, node: &Self::Node) -> Result<String>;

    fn attributes(&self, node: &Self::Node) -> Result<IndexMap<String, String>>;

    fn bounding_rect(&self, node: &Self::Node) -> Result<Rect>;

    /// Light DOM children of `node`, of any node type
    fn child_nodes(&self, node: &Self::Node) -> Result<Vec<Self::Node>>;

    /// Children of the shadow root attached to `node`, if it hosts one
    fn shadow_child_nodes(&self, node: &Self::Node) -> Result<Option<Vec<Self::Node>>>;

    /// Whether `node` is an element matching `selector`
    fn matches(&self, node: &Self::Node, selector: &str) -> Result<bool>;
}

impl<D: Document + ?Sized> Document for &D {
    type Node = D::Node;

    fn query_selector(&self, selector: &str) -> Result<Option<Self::Node>> {
        (**self).query_selector(selector)
    }

    fn query_selector_all(&self, scope: &Self::Node, selector: &str) -> Result<Vec<Self::Node>> {
        (**self).query_selector_all(scope, selector)
    }

    fn element_from_point(&self, point: Point) -> Result<Option<Self::Node>> {
        (**self).element_from_point(point)
    }

    fn node_type(&self, node: &Self::Node) -> Result<NodeType> {
        (**self).node_type(node)
    }

    fn tag_name(&self, node: &Self::Node) -> Result<String> {
        (**self).tag_name(node)
    }

    fn attributes(&self, node: &Self::Node) -> Result<IndexMap<String, String>> {
        (**self).attributes(node)
    }

    fn bounding_rect(&self, node: &Self::Node) -> Result<Rect> {
        (**self).bounding_rect(node)
    }

    fn child_nodes(&self, node: &Self::Node) -> Result<Vec<Self::Node>> {
        (**self).child_nodes(node)
    }

    fn shadow_child_nodes(&self, node: &Self::Node) -> Result<Option<Vec<Self::Node>>> {
        (**self).shadow_child_nodes(node)
    }

    fn matches(&self, node: &Self::Node, selector: &str) -> Result<bool> {
        (**self).matches(node, selector)
    }
}

/// Strategy for listing the children of a node during a tree walk
pub trait ChildEnumerator<D: Document + ?Sized> {
    fn children(&self, document: &D, node: &D::Node) -> Result<Vec<D::Node>>;
}

/// Logical (light DOM) children only
#[derive(Debug, Clone, Copy, Default)]
pub struct LightChildren;

/// Shadow root content first, then the light DOM children
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowIncludingChildren;

impl<D: Document + ?Sized> ChildEnumerator<D> for LightChildren {
    fn children(&self, document: &D, node: &D::Node) -> Result<Vec<D::Node>> {
        document.child_nodes(node)
    }
}

impl<D: Document + ?Sized> ChildEnumerator<D> for ShadowIncludingChildren {
    fn children(&self, document: &D, node: &D::Node) -> Result<Vec<D::Node>> {
        let mut children = document.shadow_child_nodes(node)?.unwrap_or_default();
        children.extend(document.child_nodes(node)?);
        Ok(children)
    }
}

/// An element given either directly or as a selector to resolve
#[derive(Debug, Clone, PartialEq)]
pub enum ElementTarget<N> {
    Selector(String),
    Node(N),
}

impl<N> From<&str> for ElementTarget<N> {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl<N> From<String> for ElementTarget<N> {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl<N> ElementTarget<N> {
    pub fn node(node: N) -> Self {
        Self::Node(node)
    }
}
