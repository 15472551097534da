use crate::error::Result;
use crate::highlight::annotate;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the screenshot tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ScreenshotParams {
    /// Outline the target of this highlighter on the capture
    #[serde(default)]
    pub highlighter_id: Option<String>,
}

/// Capture the viewport as a base64 PNG
#[derive(Default)]
pub struct ScreenshotTool;

impl Tool for ScreenshotTool {
    type Params = ScreenshotParams;

    fn name(&self) -> &str {
        "screenshot"
    }

    fn execute_typed(&self, params: ScreenshotParams, context: &mut ToolContext) -> Result<ToolResult> {
        let outlined = match &params.highlighter_id {
            Some(id) => context.session.inspector()?.get_highlighter_target_data(id)?,
            None => None,
        };

        let png = match &outlined {
            Some(target) => context.session.annotated_screenshot(std::slice::from_ref(target))?,
            None => context.session.screenshot()?,
        };

        Ok(ToolResult::success_with(serde_json::json!({
            "format": "png",
            "outlined": outlined.is_some(),
            "size": png.len(),
            "data": annotate::to_base64(&png),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_default() {
        let params: ScreenshotParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(params.highlighter_id.is_none());
    }

    #[test]
    fn test_tool_metadata() {
        assert_eq!(ScreenshotTool.name(), "screenshot");
        assert!(ScreenshotTool.parameters_schema().is_object());
    }
}
