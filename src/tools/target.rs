use crate::error::Result;
use crate::tools::{HighlighterIdParams, Tool, ToolContext, ToolResult, to_data};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Describe a highlighter's current target; `null` data when it has none
#[derive(Default)]
pub struct TargetDataTool;

impl Tool for TargetDataTool {
    type Params = HighlighterIdParams;

    fn name(&self) -> &str {
        "highlighter_target"
    }

    fn execute_typed(&self, params: HighlighterIdParams, context: &mut ToolContext) -> Result<ToolResult> {
        let data = context.session.inspector()?.get_highlighter_target_data(&params.highlighter_id)?;
        Ok(ToolResult::success_with(to_data(self.name(), &data)?))
    }
}

/// Parameters for the highlighter_target_children tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TargetChildrenParams {
    pub highlighter_id: String,

    /// CSS selector matched against the target's descendants
    pub selector: String,
}

#[derive(Default)]
pub struct TargetChildrenTool;

impl Tool for TargetChildrenTool {
    type Params = TargetChildrenParams;

    fn name(&self) -> &str {
        "highlighter_target_children"
    }

    fn execute_typed(&self, params: TargetChildrenParams, context: &mut ToolContext) -> Result<ToolResult> {
        let children = context
            .session
            .inspector()?
            .get_highlighter_target_children_data(&params.highlighter_id, &params.selector)?;

        Ok(ToolResult::success_with(serde_json::json!({
            "count": children.len(),
            "elements": to_data(self.name(), &children)?,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_params() {
        let params: TargetChildrenParams = serde_json::from_value(serde_json::json!({
            "highlighter_id": "main",
            "selector": ".item"
        }))
        .unwrap();
        assert_eq!(params.highlighter_id, "main");
        assert_eq!(params.selector, ".item");

        assert!(serde_json::from_value::<TargetChildrenParams>(serde_json::json!({ "highlighter_id": "main" })).is_err());
    }

    #[test]
    fn test_tool_names() {
        assert_eq!(TargetDataTool.name(), "highlighter_target");
        assert_eq!(TargetChildrenTool.name(), "highlighter_target_children");
    }
}
