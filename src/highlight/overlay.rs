use crate::error::Result;
use crate::highlight::{HighlightStyle, Highlighter};

/// Highlighter that only tracks state; nothing is drawn.
///
/// Used for offline snapshots and as the reference behaviour of a highlighter.
#[derive(Debug, Clone)]
pub struct OverlayHighlighter<N> {
    target: Option<N>,
    visible: bool,
    style: HighlightStyle,
}

impl<N> Default for OverlayHighlighter<N> {
    fn default() -> Self {
        Self {
            target: None,
            visible: false,
            style: HighlightStyle::default(),
        }
    }
}

impl<N> OverlayHighlighter<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set style
    pub fn with_style(mut self, style: HighlightStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }
}

impl<N: Clone> Highlighter for OverlayHighlighter<N> {
    type Node = N;

    fn highlight(&mut self, element: N) -> Result<()> {
        self.target = Some(element);
        self.visible = true;
        Ok(())
    }

    fn hide(&mut self) -> Result<()> {
        self.visible = false;
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.visible = true;
        Ok(())
    }

    fn target(&self) -> Option<&N> {
        self.target.as_ref()
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_highlighter_has_no_target() {
        let highlighter: OverlayHighlighter<u32> = OverlayHighlighter::new();
        assert!(highlighter.target().is_none());
        assert!(!highlighter.is_visible());
    }

    #[test]
    fn test_hide_and_show_keep_target() {
        let mut highlighter = OverlayHighlighter::new();
        highlighter.highlight(3u32).unwrap();
        assert_eq!(highlighter.target(), Some(&3));
        assert!(highlighter.is_visible());

        highlighter.hide().unwrap();
        assert!(!highlighter.is_visible());
        assert_eq!(highlighter.target(), Some(&3));

        highlighter.show().unwrap();
        assert!(highlighter.is_visible());

        highlighter.highlight(5).unwrap();
        assert_eq!(highlighter.target(), Some(&5));
    }

    #[test]
    fn test_with_style() {
        let highlighter: OverlayHighlighter<u32> =
            OverlayHighlighter::new().with_style(HighlightStyle::new("green", "none"));
        assert_eq!(highlighter.style().border_color, "green");
    }
}
