use crate::dom::{self, LightChildren, ShadowIncludingChildren, TreeFilter};
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult, to_data};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the element_tree tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ElementTreeParams {
    /// CSS selector of the subtree root (default: "body")
    #[serde(default = "default_root")]
    pub root: String,

    /// Keep only children matching this selector; a rejected child drops its whole subtree
    #[serde(default)]
    pub filter: Option<String>,

    /// Walk shadow roots before light children
    #[serde(default)]
    pub include_shadow: bool,
}

fn default_root() -> String {
    "body".to_string()
}

/// Nested tag-name tree of an element's subtree
#[derive(Default)]
pub struct ElementTreeTool;

impl Tool for ElementTreeTool {
    type Params = ElementTreeParams;

    fn name(&self) -> &str {
        "element_tree"
    }

    fn execute_typed(&self, params: ElementTreeParams, context: &mut ToolContext) -> Result<ToolResult> {
        let document = context.session.document()?;
        let filter = match params.filter {
            Some(selector) => TreeFilter::selector(selector),
            None => TreeFilter::All,
        };

        let tree = if params.include_shadow {
            dom::element_node_tree_data(&document, &ShadowIncludingChildren, params.root.as_str(), &filter)?
        } else {
            dom::element_node_tree_data(&document, &LightChildren, params.root.as_str(), &filter)?
        };

        let Some(tree) = tree else {
            return Ok(ToolResult::success_with(serde_json::Value::Null));
        };

        log::debug!("Element tree under '{}' has {} nodes", params.root, tree.count_nodes());
        Ok(ToolResult::success_with(to_data(self.name(), &tree)?))
    }
}
