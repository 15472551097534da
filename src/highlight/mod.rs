//! Highlighters and the inspector controller
//!
//! A highlighter visually marks one element at a time and remembers it as its
//! target. Highlighters are owned by a [`HighlighterRegistry`] and looked up by
//! id; the [`Inspector`] drives them against a [`Document`](crate::dom::Document).

pub mod annotate;
pub mod inspector;
pub mod overlay;
pub mod page;

pub use inspector::Inspector;
pub use overlay::OverlayHighlighter;
pub use page::PageHighlighter;

use crate::error::{InspectorError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Something that can visually mark a single element
pub trait Highlighter {
    type Node: Clone;

    /// Mark `element`, making it the target and showing the highlight
    fn highlight(&mut self, element: Self::Node) -> Result<()>;

    /// Hide the highlight, keeping the target
    fn hide(&mut self) -> Result<()>;

    /// Show the highlight again for the current target
    fn show(&mut self) -> Result<()>;

    /// The currently highlighted element, if any
    fn target(&self) -> Option<&Self::Node>;

    fn is_visible(&self) -> bool;
}

/// Lookup of highlighters by id
pub trait HighlighterRegistry {
    type Highlighter: Highlighter;

    fn highlighter(&self, id: &str) -> Option<&Self::Highlighter>;

    fn highlighter_mut(&mut self, id: &str) -> Option<&mut Self::Highlighter>;
}

impl<R: HighlighterRegistry + ?Sized> HighlighterRegistry for &mut R {
    type Highlighter = R::Highlighter;

    fn highlighter(&self, id: &str) -> Option<&Self::Highlighter> {
        (**self).highlighter(id)
    }

    fn highlighter_mut(&mut self, id: &str) -> Option<&mut Self::Highlighter> {
        (**self).highlighter_mut(id)
    }
}

/// Visual style of a highlight overlay (CSS colour values)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct HighlightStyle {
    pub border_color: String,
    pub fill_color: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            border_color: "rgba(255, 0, 0, 0.9)".to_string(),
            fill_color: "rgba(111, 168, 220, 0.35)".to_string(),
        }
    }
}

impl HighlightStyle {
    pub fn new(border_color: impl Into<String>, fill_color: impl Into<String>) -> Self {
        Self {
            border_color: border_color.into(),
            fill_color: fill_color.into(),
        }
    }
}

/// Registry of highlighters keyed by id.
/// Uses IndexMap to preserve registration order
#[derive(Debug)]
pub struct HighlighterMap<H> {
    map: IndexMap<String, H>,
}

impl<H> Default for HighlighterMap<H> {
    fn default() -> Self {
        Self { map: IndexMap::new() }
    }
}

impl<H> HighlighterMap<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a highlighter under a new id
    pub fn insert(&mut self, id: impl Into<String>, highlighter: H) -> Result<()> {
        let id = id.into();
        if self.map.contains_key(&id) {
            return Err(InspectorError::HighlighterExists(id));
        }
        self.map.insert(id, highlighter);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<H> {
        self.map.shift_remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut H> {
        self.map.values_mut()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<H: Highlighter> HighlighterRegistry for HighlighterMap<H> {
    type Highlighter = H;

    fn highlighter(&self, id: &str) -> Option<&H> {
        self.map.get(id)
    }

    fn highlighter_mut(&mut self, id: &str) -> Option<&mut H> {
        self.map.get_mut(id)
    }
}
