use crate::dom::analysis;
use crate::dom::document::{ChildEnumerator, Document, ElementTarget};
use crate::dom::element::{ElementDescriptor, Point};
use crate::dom::tree::{self, ElementTreeNode, TreeFilter};
use crate::error::{InspectorError, Result};
use crate::highlight::{Highlighter, HighlighterRegistry};

/// Drives highlighters against a document and reports on their targets.
///
/// The inspector owns no state of its own: targets and visibility live in
/// the highlighters of the registry it was given.
pub struct Inspector<D, R> {
    document: D,
    highlighters: R,
}

fn lookup<'r, R: HighlighterRegistry>(registry: &'r mut R, id: &str) -> Result<&'r mut R::Highlighter> {
    registry
        .highlighter_mut(id)
        .ok_or_else(|| InspectorError::HighlighterNotFound(id.to_string()))
}

impl<D, R> Inspector<D, R>
where
    D: Document,
    R: HighlighterRegistry,
    R::Highlighter: Highlighter<Node = D::Node>,
{
    pub fn new(document: D, highlighters: R) -> Self {
        Self { document, highlighters }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn highlighters(&self) -> &R {
        &self.highlighters
    }

    pub fn highlighters_mut(&mut self) -> &mut R {
        &mut self.highlighters
    }

    pub fn into_parts(self) -> (D, R) {
        (self.document, self.highlighters)
    }

    /// Highlight the topmost element at a viewport point
    pub fn highlight_element_at_point(&mut self, highlighter_id: &str, point: Point) -> Result<D::Node> {
        let highlighter = lookup(&mut self.highlighters, highlighter_id)?;
        let element = self
            .document
            .element_from_point(point)?
            .ok_or_else(|| InspectorError::ElementNotFound(format!("No element at ({}, {})", point.x, point.y)))?;

        highlighter.highlight(element.clone())?;
        log::debug!("Highlighter '{}' now targets {:?}", highlighter_id, element);
        Ok(element)
    }

    /// Highlight the first element matching `selector`
    pub fn highlight_element_for_selector(&mut self, highlighter_id: &str, selector: &str) -> Result<D::Node> {
        let highlighter = lookup(&mut self.highlighters, highlighter_id)?;
        let element = self
            .document
            .query_selector(selector)?
            .ok_or_else(|| InspectorError::ElementNotFound(selector.to_string()))?;

        highlighter.highlight(element.clone())?;
        log::debug!("Highlighter '{}' now targets {:?}", highlighter_id, element);
        Ok(element)
    }

    #[deprecated(note = "use `hide_highlighter` instead")]
    pub fn un_highlight(&mut self, highlighter_id: &str) -> Result<()> {
        log::warn!("Inspector::un_highlight is deprecated, use Inspector::hide_highlighter");
        self.hide_highlighter(highlighter_id)
    }

    pub fn hide_highlighter(&mut self, highlighter_id: &str) -> Result<()> {
        lookup(&mut self.highlighters, highlighter_id)?.hide()
    }

    pub fn show_highlighter(&mut self, highlighter_id: &str) -> Result<()> {
        lookup(&mut self.highlighters, highlighter_id)?.show()
    }

    /// Current target of a highlighter, if it has one
    pub fn highlighter_target(&self, highlighter_id: &str) -> Result<Option<D::Node>> {
        let highlighter = self
            .highlighters
            .highlighter(highlighter_id)
            .ok_or_else(|| InspectorError::HighlighterNotFound(highlighter_id.to_string()))?;
        Ok(highlighter.target().cloned())
    }

    /// Descriptor of the highlighter's target; `None` when nothing is highlighted
    pub fn get_highlighter_target_data(&self, highlighter_id: &str) -> Result<Option<ElementDescriptor>> {
        match self.highlighter_target(highlighter_id)? {
            Some(target) => Ok(Some(self.element_data(ElementTarget::Node(target))?)),
            None => Ok(None),
        }
    }

    /// Descriptors of the target's descendants matching `children_selector`, in document order
    pub fn get_highlighter_target_children_data(
        &self,
        highlighter_id: &str,
        children_selector: &str,
    ) -> Result<Vec<ElementDescriptor>> {
        let Some(target) = self.highlighter_target(highlighter_id)? else {
            return Ok(Vec::new());
        };

        let children = self.document.query_selector_all(&target, children_selector)?;
        self.elements_data(children)
    }

    pub fn element_data(&self, element: impl Into<ElementTarget<D::Node>>) -> Result<ElementDescriptor> {
        analysis::element_data(&self.document, element)
    }

    pub fn elements_data(&self, elements: impl IntoIterator<Item = D::Node>) -> Result<Vec<ElementDescriptor>> {
        analysis::elements_data(&self.document, elements)
    }

    pub fn element_node_tree_data<C: ChildEnumerator<D> + ?Sized>(
        &self,
        children: &C,
        root: impl Into<ElementTarget<D::Node>>,
        filter: &TreeFilter<'_, D::Node>,
    ) -> Result<Option<ElementTreeNode>> {
        tree::element_node_tree_data(&self.document, children, root, filter)
    }
}
