//! DOM access and extraction module
//!
//! This module provides functionality for describing elements and walking
//! element subtrees over any [`Document`]. It includes:
//! - Document / ChildEnumerator: capability traits for querying a page
//! - ElementDescriptor: tag name, attributes and layout rect of an element
//! - ElementTreeNode: element-only tree extracted from a subtree
//! - PageSnapshot: offline document parsed from HTML
//! - PageDocument: live document backed by a browser tab

pub mod analysis;
pub mod document;
pub mod element;
pub mod page;
pub mod snapshot;
pub mod tree;

pub use analysis::{element_data, elements_data};
pub use document::{ChildEnumerator, Document, ElementTarget, LightChildren, NodeType, ShadowIncludingChildren};
pub use element::{ElementDescriptor, Point, Rect};
pub use page::{NodeHandle, PageDocument};
pub use snapshot::{PageSnapshot, SnapshotNode};
pub use tree::{ElementTreeNode, TreeFilter, element_node_tree_data};
