use crate::dom::document::{Document, NodeType};
use crate::dom::element::{Point, Rect};
use crate::error::{InspectorError, Result};
use headless_chrome::Tab;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Page-side helper, installed once per document; keeps the node handle registry and highlighter overlays
const INSPECTOR_JS: &str = include_str!("inspector.js");

/// Handle to a node held in the page's registry.
///
/// `page` is a token drawn when the helper is installed into a document, so a
/// handle from a page that has since navigated away (or reloaded) never
/// resolves to a node of the new document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeHandle {
    pub page: u32,
    pub id: u32,
}

impl NodeHandle {
    pub fn new(page: u32, id: u32) -> Self {
        Self { page, id }
    }

    /// The handle as a JavaScript object literal
    pub(crate) fn js(&self) -> String {
        format!("{{page:{},id:{}}}", self.page, self.id)
    }
}

impl std::fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.page, self.id)
    }
}

/// Document backed by a live browser tab
#[derive(Clone)]
pub struct PageDocument {
    tab: Arc<Tab>,
}

impl PageDocument {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }

    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Evaluate an expression against the inspector API (bound as `api`).
    ///
    /// The page wraps the value (or the thrown error) in a JSON envelope
    /// string. The helper script is only sent when the current document does
    /// not have it yet.
    pub(crate) fn call<T: DeserializeOwned>(&self, expression: &str) -> Result<T> {
        match self.evaluate_envelope(expression)? {
            Reply::Missing { .. } => {
                self.install()?;
                match self.evaluate_envelope(expression)? {
                    Reply::Missing { .. } => Err(InspectorError::EvaluationFailed(format!(
                        "{}: inspector helper could not be installed",
                        expression
                    ))),
                    reply => reply.into_result(expression),
                }
            }
            reply => reply.into_result(expression),
        }
    }

    fn install(&self) -> Result<()> {
        log::debug!("Installing inspector helper into the page");
        self.tab
            .evaluate(INSPECTOR_JS, false)
            .map_err(|e| InspectorError::EvaluationFailed(format!("Failed to install inspector helper: {}", e)))?;
        Ok(())
    }

    fn evaluate_envelope<T: DeserializeOwned>(&self, expression: &str) -> Result<Reply<T>> {
        let script = format!(
            "(function (api) {{ if (!api) {{ return JSON.stringify({{ missing: true }}); }} try {{ var value = {}; return JSON.stringify({{ ok: value === undefined ? null : value }}); }} catch (e) {{ return JSON.stringify({{ error: String(e) }}); }} }})(window.__elementInspector);",
            expression
        );

        let result = self
            .tab
            .evaluate(&script, false)
            .map_err(|e| InspectorError::EvaluationFailed(format!("{}: {}", expression, e)))?;

        let json_value = result
            .value
            .ok_or_else(|| InspectorError::DomParseFailed(format!("No value returned from '{}'", expression)))?;

        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| InspectorError::DomParseFailed(format!("Failed to get JSON string: {}", e)))?;

        parse_reply(expression, &json_str)
    }

    /// Same as [`call`](Self::call), but a stale handle surfaces as `ElementNotFound`
    fn call_on<T: DeserializeOwned>(&self, node: NodeHandle, expression: &str) -> Result<T> {
        self.call(expression).map_err(|e| match e {
            InspectorError::EvaluationFailed(reason) if reason.contains("Stale node handle") => {
                InspectorError::ElementNotFound(format!("Node handle {} is stale", node))
            }
            other => other,
        })
    }
}

/// Quote a string as a JavaScript literal
pub(crate) fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Envelope returned by every page call
#[derive(Deserialize)]
#[serde(untagged)]
enum Reply<T> {
    // listed first: an envelope without `ok` would otherwise read as `Done { ok: None }`
    Missing {
        #[allow(dead_code)]
        missing: bool,
    },
    Failed {
        error: String,
    },
    Done {
        ok: T,
    },
}

impl<T> Reply<T> {
    fn into_result(self, expression: &str) -> Result<T> {
        match self {
            Reply::Done { ok } => Ok(ok),
            Reply::Failed { error } => Err(InspectorError::EvaluationFailed(format!("{}: {}", expression, error))),
            Reply::Missing { .. } => Err(InspectorError::EvaluationFailed(format!(
                "{}: inspector helper is not installed",
                expression
            ))),
        }
    }
}

fn parse_reply<T: DeserializeOwned>(expression: &str, json: &str) -> Result<Reply<T>> {
    serde_json::from_str(json)
        .map_err(|e| InspectorError::DomParseFailed(format!("Failed to parse result of '{}': {}", expression, e)))
}

#[derive(Deserialize)]
struct JsRect {
    top: f64,
    left: f64,
    width: f64,
    height: f64,
}

impl Document for PageDocument {
    type Node = NodeHandle;

    fn query_selector(&self, selector: &str) -> Result<Option<NodeHandle>> {
        self.call(&format!("api.querySelector({})", js_string(selector)))
            .map_err(|e| selector_error(selector, e))
    }

    fn query_selector_all(&self, scope: &NodeHandle, selector: &str) -> Result<Vec<NodeHandle>> {
        self.call_on(*scope, &format!("api.querySelectorAll({}, {})", scope.js(), js_string(selector)))
            .map_err(|e| selector_error(selector, e))
    }

    fn element_from_point(&self, point: Point) -> Result<Option<NodeHandle>> {
        self.call(&format!("api.elementFromPoint({}, {})", point.x, point.y))
    }

    fn node_type(&self, node: &NodeHandle) -> Result<NodeType> {
        let code: u16 = self.call_on(*node, &format!("api.nodeType({})", node.js()))?;
        NodeType::from_code(code).ok_or_else(|| InspectorError::DomParseFailed(format!("Unknown node type {}", code)))
    }

    fn tag_name(&self, node: &NodeHandle) -> Result<String> {
        let tag_name: Option<String> = self.call_on(*node, &format!("api.tagName({})", node.js()))?;
        tag_name.ok_or_else(|| InspectorError::InvalidArgument(format!("Node handle {} is not an element", node)))
    }

    fn attributes(&self, node: &NodeHandle) -> Result<IndexMap<String, String>> {
        let pairs: Option<Vec<(String, String)>> = self.call_on(*node, &format!("api.attributes({})", node.js()))?;
        Ok(pairs.unwrap_or_default().into_iter().collect())
    }

    fn bounding_rect(&self, node: &NodeHandle) -> Result<Rect> {
        let rect: JsRect = self.call_on(*node, &format!("api.rect({})", node.js()))?;
        Ok(Rect::new(rect.top, rect.left, rect.width, rect.height))
    }

    fn child_nodes(&self, node: &NodeHandle) -> Result<Vec<NodeHandle>> {
        self.call_on(*node, &format!("api.childNodes({})", node.js()))
    }

    fn shadow_child_nodes(&self, node: &NodeHandle) -> Result<Option<Vec<NodeHandle>>> {
        self.call_on(*node, &format!("api.shadowChildNodes({})", node.js()))
    }

    fn matches(&self, node: &NodeHandle, selector: &str) -> Result<bool> {
        self.call_on(*node, &format!("api.matches({}, {})", node.js(), js_string(selector)))
            .map_err(|e| selector_error(selector, e))
    }
}

/// Map the page's SyntaxError for a bad selector onto `InvalidSelector`
fn selector_error(selector: &str, error: InspectorError) -> InspectorError {
    match error {
        InspectorError::EvaluationFailed(reason) if reason.contains("is not a valid selector") => {
            InspectorError::invalid_selector(selector, reason)
        }
        other => other,
    }
}
