use crate::browser::{BrowserSession, LaunchOptions};
use crate::error::Result as InspectorResult;
use crate::tools::ToolRegistry;
use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};
use std::sync::{Arc, Mutex, MutexGuard};

/// MCP server exposing the inspector tools over one browser session
#[derive(Clone)]
pub struct InspectorServer {
    session: Arc<Mutex<BrowserSession>>,
    tools: Arc<ToolRegistry>,
    tool_router: ToolRouter<Self>,
}

impl InspectorServer {
    /// Launch a headless browser with default options
    pub fn new() -> InspectorResult<Self> {
        Self::with_options(LaunchOptions::default())
    }

    pub fn with_options(options: LaunchOptions) -> InspectorResult<Self> {
        Ok(Self::with_session(BrowserSession::launch(options)?))
    }

    /// Serve an existing session
    pub fn with_session(session: BrowserSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            tools: Arc::new(ToolRegistry::with_defaults()),
            tool_router: Self::tool_router(),
        }
    }

    /// Lock the browser session; a poisoned lock still yields the session
    pub fn session(&self) -> MutexGuard<'_, BrowserSession> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }
}

#[tool_handler]
impl ServerHandler for InspectorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Element inspector: describe elements, walk element subtrees and drive named \
                 highlighters on the page open in the browser. Create a highlighter before \
                 highlighting; targets are reported as tagName, attributes and rect."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_server_handler<T: ServerHandler + Clone + Send + Sync + 'static>() {}

    #[test]
    fn test_server_implements_handler() {
        assert_server_handler::<InspectorServer>();
    }

    #[test]
    fn test_router_lists_every_tool() {
        let names: Vec<_> = InspectorServer::tool_router()
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();

        assert_eq!(names.len(), ToolRegistry::with_defaults().len());
        assert!(names.iter().any(|name| name == "inspector_highlight"));
    }
}
