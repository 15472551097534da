//! MCP (Model Context Protocol) server for element inspection
//!
//! Each MCP tool forwards to the tool of the same purpose in the
//! [`ToolRegistry`](crate::tools::ToolRegistry), run against the server's
//! browser session.

pub mod handler;
pub use handler::InspectorServer;

use crate::tools::{
    CreateHighlighterParams, ElementDataParams, ElementTreeParams, HighlightParams, HighlighterIdParams,
    NavigateParams, ScreenshotParams, TargetChildrenParams, ToolContext, ToolResult as InternalToolResult,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    tool, tool_router,
};
use serde::Serialize;

/// Convert internal ToolResult to MCP CallToolResult
fn convert_result(result: InternalToolResult) -> Result<CallToolResult, McpError> {
    if result.success {
        let text = match result.data {
            Some(data) => serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string()),
            None => "Success".to_string(),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    } else {
        let error_msg = result.error.unwrap_or_else(|| "Unknown error".to_string());
        Err(McpError::internal_error(error_msg, None))
    }
}

impl InspectorServer {
    fn run_tool<P: Serialize>(&self, name: &str, params: P) -> Result<CallToolResult, McpError> {
        let params = serde_json::to_value(params).map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let mut session = self.session();
        let mut context = ToolContext::new(&mut session);

        let result = self
            .tools()
            .execute(name, params, &mut context)
            .unwrap_or_else(|e| InternalToolResult::failure(e.to_string()));

        convert_result(result)
    }
}

#[tool_router]
impl InspectorServer {
    #[tool(description = "Navigate the browser to a URL")]
    fn browser_navigate(&self, params: Parameters<NavigateParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("navigate", params.0)
    }

    #[tool(description = "Describe the first element (or every element) matching a CSS selector: tagName, attributes and bounding rect")]
    fn inspector_element_data(&self, params: Parameters<ElementDataParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("element_data", params.0)
    }

    #[tool(description = "Nested tagName tree of an element's subtree, optionally filtered by selector and walking shadow roots")]
    fn inspector_element_tree(&self, params: Parameters<ElementTreeParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("element_tree", params.0)
    }

    #[tool(description = "Create a named highlighter overlay with optional border and fill colours")]
    fn inspector_create_highlighter(
        &self,
        params: Parameters<CreateHighlighterParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool("create_highlighter", params.0)
    }

    #[tool(description = "Highlight the first element matching a selector, or the topmost element at viewport point (x, y)")]
    fn inspector_highlight(&self, params: Parameters<HighlightParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("highlight", params.0)
    }

    #[tool(description = "Hide a highlighter without forgetting its target")]
    fn inspector_hide_highlighter(&self, params: Parameters<HighlighterIdParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("hide_highlighter", params.0)
    }

    #[tool(description = "Show a hidden highlighter over its current target")]
    fn inspector_show_highlighter(&self, params: Parameters<HighlighterIdParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("show_highlighter", params.0)
    }

    #[tool(description = "Describe the element a highlighter currently targets (null when it has none)")]
    fn inspector_highlighter_target(
        &self,
        params: Parameters<HighlighterIdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool("highlighter_target", params.0)
    }

    #[tool(description = "Describe the descendants of a highlighter's target that match a selector, in document order")]
    fn inspector_highlighter_target_children(
        &self,
        params: Parameters<TargetChildrenParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool("highlighter_target_children", params.0)
    }

    #[tool(description = "Capture the viewport as a base64 PNG, optionally outlining a highlighter's target")]
    fn browser_screenshot(&self, params: Parameters<ScreenshotParams>) -> Result<CallToolResult, McpError> {
        self.run_tool("screenshot", params.0)
    }
}
