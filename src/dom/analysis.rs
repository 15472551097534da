//! Element data extraction

use crate::dom::document::{Document, ElementTarget};
use crate::dom::element::ElementDescriptor;
use crate::error::{InspectorError, Result};

/// Resolve a target to a node, querying the document for selectors
pub fn resolve<D: Document + ?Sized>(document: &D, target: ElementTarget<D::Node>) -> Result<D::Node> {
    match target {
        ElementTarget::Node(node) => Ok(node),
        ElementTarget::Selector(selector) => document
            .query_selector(&selector)?
            .ok_or(InspectorError::ElementNotFound(selector)),
    }
}

/// Describe a single element: tag name, attributes and layout rectangle
pub fn element_data<D: Document + ?Sized>(
    document: &D,
    target: impl Into<ElementTarget<D::Node>>,
) -> Result<ElementDescriptor> {
    let node = resolve(document, target.into())?;

    Ok(ElementDescriptor {
        tag_name: document.tag_name(&node)?,
        attributes: document.attributes(&node)?,
        rect: document.bounding_rect(&node)?,
    })
}

/// Describe a collection of elements, preserving input order
pub fn elements_data<D, I>(document: &D, elements: I) -> Result<Vec<ElementDescriptor>>
where
    D: Document + ?Sized,
    I: IntoIterator<Item = D::Node>,
{
    elements
        .into_iter()
        .map(|node| element_data(document, ElementTarget::Node(node)))
        .collect()
}
