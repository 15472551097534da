use crate::dom::page::{NodeHandle, PageDocument, js_string};
use crate::error::{InspectorError, Result};
use crate::highlight::{HighlightStyle, Highlighter};

/// Highlighter drawing a fixed-position overlay box inside a live page.
///
/// The overlay is tagged so it never shows up in queries, hit tests or
/// child enumeration. If the page navigated away and lost the overlay, it is
/// recreated on the next call.
pub struct PageHighlighter {
    id: String,
    document: PageDocument,
    style: HighlightStyle,
    target: Option<NodeHandle>,
    visible: bool,
}

impl PageHighlighter {
    /// Install a new overlay in the page
    pub fn create(document: PageDocument, id: impl Into<String>, style: HighlightStyle) -> Result<Self> {
        let highlighter = Self {
            id: id.into(),
            document,
            style,
            target: None,
            visible: false,
        };

        if !highlighter.install()? {
            return Err(InspectorError::HighlighterExists(highlighter.id));
        }

        log::debug!("Created page highlighter '{}'", highlighter.id);
        Ok(highlighter)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    /// Drop the target without touching the page; for after navigation,
    /// when the node handle no longer resolves
    pub fn forget_target(&mut self) -> bool {
        self.visible = false;
        self.target.take().is_some()
    }

    /// Remove the overlay from the page
    pub fn remove(self) -> Result<()> {
        self.document
            .call::<bool>(&format!("api.removeHighlighter({})", js_string(&self.id)))?;
        Ok(())
    }

    fn install(&self) -> Result<bool> {
        self.document.call(&format!(
            "api.createHighlighter({}, {}, {})",
            js_string(&self.id),
            js_string(&self.style.border_color),
            js_string(&self.style.fill_color)
        ))
    }

    fn invoke(&self, expression: &str) -> Result<()> {
        match self.document.call::<bool>(expression) {
            Err(InspectorError::EvaluationFailed(reason)) if reason.contains("Unknown highlighter") => {
                log::debug!("Overlay for highlighter '{}' is gone, reinstalling", self.id);
                self.install()?;
                self.document.call::<bool>(expression)?;
                Ok(())
            }
            Err(InspectorError::EvaluationFailed(reason)) if reason.contains("Stale node handle") => {
                Err(InspectorError::ElementNotFound(reason))
            }
            other => other.map(|_| ()),
        }
    }
}

impl Highlighter for PageHighlighter {
    type Node = NodeHandle;

    fn highlight(&mut self, element: NodeHandle) -> Result<()> {
        self.invoke(&format!("api.highlight({}, {})", js_string(&self.id), element.js()))?;
        self.target = Some(element);
        self.visible = true;
        Ok(())
    }

    fn hide(&mut self) -> Result<()> {
        self.invoke(&format!("api.hide({})", js_string(&self.id)))?;
        self.visible = false;
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.invoke(&format!("api.show({})", js_string(&self.id)))?;
        self.visible = true;
        Ok(())
    }

    fn target(&self) -> Option<&NodeHandle> {
        self.target.as_ref()
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
