use crate::dom::{self, Document};
use crate::error::{InspectorError, Result};
use crate::tools::{Tool, ToolContext, ToolResult, to_data};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the element_data tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ElementDataParams {
    /// CSS selector of the element(s) to describe
    pub selector: String,

    /// Describe every match in document order instead of the first one
    #[serde(default)]
    pub all: bool,
}

/// Describe elements by tag name, attributes and bounding rectangle
#[derive(Default)]
pub struct ElementDataTool;

impl Tool for ElementDataTool {
    type Params = ElementDataParams;

    fn name(&self) -> &str {
        "element_data"
    }

    fn execute_typed(&self, params: ElementDataParams, context: &mut ToolContext) -> Result<ToolResult> {
        let document = context.session.document()?;

        if !params.all {
            let data = dom::element_data(&document, params.selector.as_str())?;
            return Ok(ToolResult::success_with(to_data(self.name(), &data)?));
        }

        let root = document
            .query_selector(":root")?
            .ok_or_else(|| InspectorError::ElementNotFound(":root".to_string()))?;
        let matches = document.query_selector_all(&root, &params.selector)?;
        let data = dom::elements_data(&document, matches)?;

        Ok(ToolResult::success_with(serde_json::json!({
            "count": data.len(),
            "elements": to_data(self.name(), &data)?,
        })))
    }
}
