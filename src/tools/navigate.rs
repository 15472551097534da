use crate::error::Result;
use crate::tools::utils::normalize_url;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the navigate tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavigateParams {
    /// URL to navigate to
    pub url: String,

    /// Wait for navigation to complete (default: true)
    #[serde(default = "default_wait")]
    pub wait_for_load: bool,
}

fn default_wait() -> bool {
    true
}

/// Load a page into the active tab.
///
/// Highlighters survive navigation but lose their targets; their overlays
/// are reinstalled by the next operation on them.
#[derive(Default)]
pub struct NavigateTool;

impl Tool for NavigateTool {
    type Params = NavigateParams;

    fn name(&self) -> &str {
        "navigate"
    }

    fn execute_typed(&self, params: NavigateParams, context: &mut ToolContext) -> Result<ToolResult> {
        let normalized_url = normalize_url(&params.url);
        log::info!("Navigating to {}", normalized_url);

        context.session.navigate(&normalized_url)?;
        if params.wait_for_load {
            context.session.wait_for_navigation()?;
        }

        let reset = context.session.reset_highlighter_targets();
        if reset > 0 {
            log::debug!("Navigation cleared the targets of {} highlighter(s)", reset);
        }

        Ok(ToolResult::success_with(serde_json::json!({
            "url": normalized_url,
            "waited": params.wait_for_load,
            "highlighters_reset": reset,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_params_default() {
        let params: NavigateParams = serde_json::from_value(serde_json::json!({ "url": "example.com" })).unwrap();
        assert_eq!(params.url, "example.com");
        assert!(params.wait_for_load);
    }

    #[test]
    fn test_navigate_params_explicit_wait() {
        let params: NavigateParams =
            serde_json::from_value(serde_json::json!({ "url": "about:blank", "wait_for_load": false })).unwrap();
        assert!(!params.wait_for_load);
    }

    #[test]
    fn test_navigate_tool_metadata() {
        let tool = NavigateTool;
        assert_eq!(tool.name(), "navigate");
        assert!(tool.parameters_schema().is_object());
    }
}
