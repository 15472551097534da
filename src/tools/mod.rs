//! Inspector tools
//!
//! Each tool takes typed, JSON-deserializable parameters and runs against a
//! [`BrowserSession`]. Tools are registered by name in a [`ToolRegistry`],
//! which is what the MCP server dispatches into.

pub mod element_data;
pub mod element_tree;
pub mod highlight;
pub mod navigate;
pub mod screenshot;
pub mod target;
pub mod utils;

pub use element_data::{ElementDataParams, ElementDataTool};
pub use element_tree::{ElementTreeParams, ElementTreeTool};
pub use highlight::{
    CreateHighlighterParams, CreateHighlighterTool, HideHighlighterTool, HighlightParams, HighlightTarget,
    HighlightTool, HighlighterIdParams, ShowHighlighterTool,
};
pub use navigate::{NavigateParams, NavigateTool};
pub use screenshot::{ScreenshotParams, ScreenshotTool};
pub use target::{TargetChildrenParams, TargetChildrenTool, TargetDataTool};

use crate::browser::BrowserSession;
use crate::error::{InspectorError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success() -> Self {
        Self { success: true, data: None, error: None }
    }

    pub fn success_with(data: Value) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }
}

/// Execution context handed to tools
pub struct ToolContext<'a> {
    pub session: &'a mut BrowserSession,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a mut BrowserSession) -> Self {
        Self { session }
    }
}

/// A named operation with typed parameters
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    /// JSON schema of the parameters
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// Deserialize `params` and run the tool
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let params = serde_json::from_value(params).map_err(|e| InspectorError::ToolExecutionFailed {
            tool: self.name().to_string(),
            reason: format!("Invalid parameters: {}", e),
        })?;
        self.execute_typed(params, context)
    }
}

/// Object-safe view of a [`Tool`], used for registry storage
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        Tool::execute(self, params, context)
    }
}

/// Tools by name, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NavigateTool);
        registry.register(ElementDataTool);
        registry.register(ElementTreeTool);
        registry.register(CreateHighlighterTool);
        registry.register(HighlightTool);
        registry.register(HideHighlighterTool);
        registry.register(ShowHighlighterTool);
        registry.register(TargetDataTool);
        registry.register(TargetChildrenTool);
        registry.register(ScreenshotTool);
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = Tool::name(&tool).to_string();
        self.tools.insert(name, Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run a tool by name
    pub fn execute(&self, name: &str, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let tool = self.get(name).ok_or_else(|| InspectorError::ToolExecutionFailed {
            tool: name.to_string(),
            reason: "Unknown tool".to_string(),
        })?;

        log::debug!("Executing tool '{}'", name);
        tool.execute(params, context)
    }
}

/// Serialize a tool's output payload
pub(crate) fn to_data<T: Serialize>(tool: &str, value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| InspectorError::ToolExecutionFailed {
        tool: tool.to_string(),
        reason: format!("Failed to serialize result: {}", e),
    })
}
