//! Offline page snapshots
//!
//! A [`PageSnapshot`] is an HTML document parsed into memory, paired with
//! explicitly assigned layout rectangles and a viewport. It implements
//! [`Document`] so every inspector operation can run without a browser.
//!
//! Declarative shadow roots (`<template shadowrootmode="open">`, or the older
//! `shadowroot` attribute) are treated as the host's shadow root: they are
//! hidden from light DOM children and from document queries, and surface
//! through [`Document::shadow_child_nodes`]. Content of any other `<template>`
//! is inert, as in a browser: it has no child nodes and queries skip it.

use crate::dom::document::{Document, NodeType};
use crate::dom::element::{Point, Rect};
use crate::error::{InspectorError, Result};
use ego_tree::{NodeId, NodeRef};
use indexmap::IndexMap;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;

/// Node handle for snapshot documents
pub type SnapshotNode = NodeId;

/// Default viewport, matching the default browser window size
pub const DEFAULT_VIEWPORT: (f64, f64) = (1280.0, 720.0);

/// In-memory document parsed from HTML
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    html: Html,
    layout: HashMap<NodeId, Rect>,
    viewport_width: f64,
    viewport_height: f64,
}

impl PageSnapshot {
    /// Parse a full HTML document
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            layout: HashMap::new(),
            viewport_width: DEFAULT_VIEWPORT.0,
            viewport_height: DEFAULT_VIEWPORT.1,
        }
    }

    /// Builder method: set viewport size
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn viewport(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    /// Assign a layout rectangle to the first element matching `selector`
    pub fn set_rect(&mut self, selector: &str, rect: Rect) -> Result<()> {
        let node = self
            .query_selector(selector)?
            .ok_or_else(|| InspectorError::ElementNotFound(selector.to_string()))?;
        self.layout.insert(node, rect);
        Ok(())
    }

    /// Assign a layout rectangle to a node
    pub fn set_node_rect(&mut self, node: SnapshotNode, rect: Rect) {
        self.layout.insert(node, rect);
    }

    /// The `<html>` element
    pub fn document_element(&self) -> Option<SnapshotNode> {
        self.html
            .tree
            .root()
            .children()
            .find(|child| child.value().is_element())
            .map(|child| child.id())
    }

    fn node(&self, id: SnapshotNode) -> Result<NodeRef<'_, Node>> {
        self.html
            .tree
            .get(id)
            .ok_or_else(|| InspectorError::ElementNotFound(format!("No snapshot node {:?}", id)))
    }

    fn element(&self, id: SnapshotNode) -> Result<ElementRef<'_>> {
        ElementRef::wrap(self.node(id)?)
            .ok_or_else(|| InspectorError::InvalidArgument(format!("Snapshot node {:?} is not an element", id)))
    }

    /// Selector matches under `scope`, skipping shadow roots and inert template contents
    fn select_within<'a>(&'a self, scope: NodeRef<'a, Node>, selector: &str) -> Result<Vec<SnapshotNode>> {
        let selector = parse_selector(selector)?;
        if is_template(scope) {
            return Ok(Vec::new());
        }
        let scope_id = scope.id();

        Ok(scope
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|element| selector.matches(element))
            .filter(|element| !hidden_below(**element, scope_id))
            .map(|element| element.id())
            .collect())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| InspectorError::invalid_selector(selector, format!("{:?}", e)))
}

fn is_template(node: NodeRef<'_, Node>) -> bool {
    node.value().as_element().is_some_and(|element| element.name() == "template")
}

fn is_shadow_root_template(node: NodeRef<'_, Node>) -> bool {
    node.value().as_element().is_some_and(|element| {
        element.name() == "template"
            && (element.attr("shadowrootmode").is_some() || element.attr("shadowroot").is_some())
    })
}

/// Content of a template. The parser keeps it in a fragment child of the
/// template element; children placed directly under it are taken as they are.
fn template_contents(template: NodeRef<'_, Node>) -> Vec<SnapshotNode> {
    let mut contents = Vec::new();
    for child in template.children() {
        match child.value() {
            Node::Fragment => contents.extend(child.children().map(|c| c.id())),
            _ => contents.push(child.id()),
        }
    }
    contents
}

/// Whether `node` is out of reach of queries made from `scope`: a shadow
/// root template itself, or anything inside a template's content
fn hidden_below(node: NodeRef<'_, Node>, scope: NodeId) -> bool {
    if is_shadow_root_template(node) {
        return true;
    }
    node.ancestors()
        .take_while(|ancestor| ancestor.id() != scope)
        .any(is_template)
}

impl Document for PageSnapshot {
    type Node = SnapshotNode;

    fn query_selector(&self, selector: &str) -> Result<Option<SnapshotNode>> {
        Ok(self.select_within(self.html.tree.root(), selector)?.into_iter().next())
    }

    fn query_selector_all(&self, scope: &SnapshotNode, selector: &str) -> Result<Vec<SnapshotNode>> {
        self.select_within(self.node(*scope)?, selector)
    }

    fn element_from_point(&self, point: Point) -> Result<Option<SnapshotNode>> {
        let in_viewport =
            point.x >= 0.0 && point.y >= 0.0 && point.x < self.viewport_width && point.y < self.viewport_height;
        if !in_viewport {
            return Ok(None);
        }

        // Later elements paint over earlier ones.
        let hit = self
            .html
            .tree
            .root()
            .descendants()
            .filter(|node| node.value().is_element())
            .filter(|node| !hidden_below(*node, self.html.tree.root().id()))
            .filter(|node| self.layout.get(&node.id()).is_some_and(|rect| rect.contains(point)))
            .last()
            .map(|node| node.id());

        Ok(hit.or_else(|| self.document_element()))
    }

    fn node_type(&self, node: &SnapshotNode) -> Result<NodeType> {
        let node_type = match self.node(*node)?.value() {
            Node::Document => NodeType::Document,
            Node::Fragment => NodeType::DocumentFragment,
            Node::Doctype(_) => NodeType::DocumentType,
            Node::Comment(_) => NodeType::Comment,
            Node::Text(_) => NodeType::Text,
            Node::Element(_) => NodeType::Element,
            Node::ProcessingInstruction(_) => NodeType::ProcessingInstruction,
        };
        Ok(node_type)
    }

    fn tag_name(&self, node: &SnapshotNode) -> Result<String> {
        Ok(self.element(*node)?.value().name().to_ascii_uppercase())
    }

    fn attributes(&self, node: &SnapshotNode) -> Result<IndexMap<String, String>> {
        Ok(self
            .element(*node)?
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect())
    }

    fn bounding_rect(&self, node: &SnapshotNode) -> Result<Rect> {
        self.element(*node)?;
        Ok(self.layout.get(node).copied().unwrap_or_default())
    }

    fn child_nodes(&self, node: &SnapshotNode) -> Result<Vec<SnapshotNode>> {
        let node = self.node(*node)?;
        // a template's children live in its content fragment, not in the tree
        if is_template(node) {
            return Ok(Vec::new());
        }
        Ok(node
            .children()
            .filter(|child| !is_shadow_root_template(*child))
            .map(|child| child.id())
            .collect())
    }

    fn shadow_child_nodes(&self, node: &SnapshotNode) -> Result<Option<Vec<SnapshotNode>>> {
        Ok(self
            .node(*node)?
            .children()
            .find(|child| is_shadow_root_template(*child))
            .map(template_contents))
    }

    fn matches(&self, node: &SnapshotNode, selector: &str) -> Result<bool> {
        let selector = parse_selector(selector)?;
        Ok(ElementRef::wrap(self.node(*node)?).is_some_and(|element| selector.matches(&element)))
    }
}
