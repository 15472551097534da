//! # element-inspector
//!
//! Helpers behind a visual DOM inspector: describe elements, extract
//! element-only subtrees and drive named highlighters, over a live
//! Chrome/Chromium page (Chrome DevTools Protocol) or an offline HTML snapshot.
//!
//! ## Features
//!
//! - **Element data**: tag name, attributes and bounding rectangle of any element
//! - **Subtree extraction**: nested tag-name trees with selector or predicate
//!   filtering, optionally walking shadow roots
//! - **Highlighters**: named overlays targeted by selector or viewport point,
//!   reporting on their target and its descendants
//! - **MCP Server**: the inspector operations as Model Context Protocol tools
//!
//! ## Offline usage
//!
//! ```rust
//! use element_inspector::dom::{LightChildren, PageSnapshot, Point, Rect, SnapshotNode, TreeFilter};
//! use element_inspector::highlight::{HighlighterMap, Inspector, OverlayHighlighter};
//!
//! # fn main() -> element_inspector::Result<()> {
//! let mut page = PageSnapshot::parse(r#"<ul id="menu"><li class="item">One</li><li>Two</li></ul>"#);
//! page.set_rect("#menu", Rect::new(0.0, 0.0, 200.0, 40.0))?;
//!
//! let mut highlighters: HighlighterMap<OverlayHighlighter<SnapshotNode>> = HighlighterMap::new();
//! highlighters.insert("main", OverlayHighlighter::new())?;
//!
//! let mut inspector = Inspector::new(&page, highlighters);
//! inspector.highlight_element_at_point("main", Point::new(10.0, 10.0))?;
//!
//! let target = inspector.get_highlighter_target_data("main")?.expect("highlighted");
//! assert_eq!(target.tag_name, "UL");
//!
//! let tree = inspector.element_node_tree_data(&LightChildren, "#menu", &TreeFilter::selector(".item"))?;
//! assert_eq!(tree.map(|t| t.child_nodes.len()), Some(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Live pages
//!
//! ```rust,no_run
//! use element_inspector::{BrowserSession, LaunchOptions};
//! use element_inspector::highlight::HighlightStyle;
//!
//! # fn main() -> element_inspector::Result<()> {
//! let mut session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com")?;
//! session.wait_for_navigation()?;
//!
//! session.create_highlighter("main", HighlightStyle::default())?;
//! let mut inspector = session.inspector()?;
//! inspector.highlight_element_for_selector("main", "h1")?;
//! println!("{:?}", inspector.get_highlighter_target_data("main")?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`dom`]: document capabilities, element data and subtree extraction, snapshot and live backends
//! - [`highlight`]: highlighters, the [`Inspector`] controller and screenshot annotation
//! - [`browser`]: browser session management and configuration
//! - [`tools`]: the inspector operations as typed, JSON-driven tools
//! - [`error`]: error types and result aliases
//! - [`mcp`]: Model Context Protocol server (requires the `mcp-handler` feature)

pub mod browser;
pub mod dom;
pub mod error;
pub mod highlight;
pub mod tools;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use dom::{ElementDescriptor, ElementTreeNode, PageDocument, PageSnapshot, Point, Rect};
pub use error::{InspectorError, Result};
pub use highlight::{HighlightStyle, Inspector};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};

#[cfg(feature = "mcp-handler")]
pub use mcp::InspectorServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
