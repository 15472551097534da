//! Highlighter lifecycle and targeting tools

use crate::dom::{ElementTarget, Point};
use crate::error::Result;
use crate::highlight::HighlightStyle;
use crate::tools::{Tool, ToolContext, ToolResult, to_data};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for tools that only name a highlighter
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HighlighterIdParams {
    /// Id of the highlighter
    pub highlighter_id: String,
}

/// Parameters for the create_highlighter tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateHighlighterParams {
    /// Id for the new highlighter
    pub highlighter_id: String,

    /// CSS colour of the overlay border
    #[serde(default)]
    pub border_color: Option<String>,

    /// CSS colour of the overlay fill
    #[serde(default)]
    pub fill_color: Option<String>,
}

impl CreateHighlighterParams {
    fn style(&self) -> HighlightStyle {
        let default = HighlightStyle::default();
        HighlightStyle::new(
            self.border_color.clone().unwrap_or(default.border_color),
            self.fill_color.clone().unwrap_or(default.fill_color),
        )
    }
}

/// Create a named highlighter overlay in the active tab
#[derive(Default)]
pub struct CreateHighlighterTool;

impl Tool for CreateHighlighterTool {
    type Params = CreateHighlighterParams;

    fn name(&self) -> &str {
        "create_highlighter"
    }

    fn execute_typed(&self, params: CreateHighlighterParams, context: &mut ToolContext) -> Result<ToolResult> {
        let style = params.style();
        context.session.create_highlighter(&params.highlighter_id, style.clone())?;

        Ok(ToolResult::success_with(serde_json::json!({
            "highlighter_id": params.highlighter_id,
            "style": to_data(self.name(), &style)?,
        })))
    }
}

/// What to highlight: the first selector match, or the topmost element at a viewport point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum HighlightTarget {
    Selector { selector: String },
    Point { x: f64, y: f64 },
}

/// Parameters for the highlight tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HighlightParams {
    /// Id of the highlighter to move
    pub highlighter_id: String,

    #[serde(flatten)]
    pub target: HighlightTarget,
}

/// Move a highlighter onto an element and report the element
#[derive(Default)]
pub struct HighlightTool;

impl Tool for HighlightTool {
    type Params = HighlightParams;

    fn name(&self) -> &str {
        "highlight"
    }

    fn execute_typed(&self, params: HighlightParams, context: &mut ToolContext) -> Result<ToolResult> {
        let mut inspector = context.session.inspector()?;

        let node = match &params.target {
            HighlightTarget::Selector { selector } => {
                inspector.highlight_element_for_selector(&params.highlighter_id, selector)?
            }
            HighlightTarget::Point { x, y } => {
                inspector.highlight_element_at_point(&params.highlighter_id, Point::new(*x, *y))?
            }
        };

        let data = inspector.element_data(ElementTarget::Node(node))?;
        Ok(ToolResult::success_with(to_data(self.name(), &data)?))
    }
}

/// Hide a highlighter's overlay, keeping its target
#[derive(Default)]
pub struct HideHighlighterTool;

impl Tool for HideHighlighterTool {
    type Params = HighlighterIdParams;

    fn name(&self) -> &str {
        "hide_highlighter"
    }

    fn execute_typed(&self, params: HighlighterIdParams, context: &mut ToolContext) -> Result<ToolResult> {
        context.session.inspector()?.hide_highlighter(&params.highlighter_id)?;
        Ok(ToolResult::success())
    }
}

/// Show a hidden highlighter over its current target
#[derive(Default)]
pub struct ShowHighlighterTool;

impl Tool for ShowHighlighterTool {
    type Params = HighlighterIdParams;

    fn name(&self) -> &str {
        "show_highlighter"
    }

    fn execute_typed(&self, params: HighlighterIdParams, context: &mut ToolContext) -> Result<ToolResult> {
        context.session.inspector()?.show_highlighter(&params.highlighter_id)?;
        Ok(ToolResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_params_selector() {
        let params: HighlightParams = serde_json::from_value(serde_json::json!({
            "highlighter_id": "main",
            "selector": "#menu li"
        }))
        .unwrap();

        assert_eq!(params.highlighter_id, "main");
        assert_eq!(params.target, HighlightTarget::Selector { selector: "#menu li".to_string() });
    }

    #[test]
    fn test_highlight_params_point() {
        let params: HighlightParams = serde_json::from_value(serde_json::json!({
            "highlighter_id": "main",
            "x": 12.5,
            "y": 40
        }))
        .unwrap();

        assert_eq!(params.target, HighlightTarget::Point { x: 12.5, y: 40.0 });
    }

    #[test]
    fn test_highlight_params_need_a_target() {
        let result = serde_json::from_value::<HighlightParams>(serde_json::json!({ "highlighter_id": "main" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_params_style() {
        let params: CreateHighlighterParams = serde_json::from_value(serde_json::json!({
            "highlighter_id": "main",
            "border_color": "lime"
        }))
        .unwrap();

        let style = params.style();
        assert_eq!(style.border_color, "lime");
        assert_eq!(style.fill_color, HighlightStyle::default().fill_color);
    }

    #[test]
    fn test_tool_names() {
        assert_eq!(CreateHighlighterTool.name(), "create_highlighter");
        assert_eq!(HighlightTool.name(), "highlight");
        assert_eq!(HideHighlighterTool.name(), "hide_highlighter");
        assert_eq!(ShowHighlighterTool.name(), "show_highlighter");
    }
}
