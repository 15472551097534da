//! Element inspector MCP server
//!
//! Exposes element description, subtree extraction and highlighter control
//! for the page open in a Chrome/Chromium instance to MCP clients.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use element_inspector::browser::{BrowserSession, ConnectionOptions, LaunchOptions};
use element_inspector::mcp::InspectorServer;
use rmcp::{
    ServiceExt,
    transport::{
        stdio,
        streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
    },
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// HTTP streamable transport
    Http,
}

#[derive(Parser)]
#[command(name = "inspector-mcp")]
#[command(version)]
#[command(about = "Element inspector MCP server", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<PathBuf>,

    /// WebSocket endpoint of a running browser to attach to instead of launching one
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// Disable the Chrome sandbox (needed when running as root in containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for the HTTP transport
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// HTTP streamable endpoint path
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

impl Cli {
    fn launch_options(&self) -> LaunchOptions {
        let mut options = LaunchOptions::new().headless(!self.headed).sandbox(!self.no_sandbox);
        if let Some(path) = &self.executable_path {
            options = options.chrome_path(path);
        }
        if let Some(dir) = &self.user_data_dir {
            options = options.user_data_dir(dir);
        }
        options
    }
}

/// Launch a browser, or attach to one when a WebSocket endpoint is given
fn start_server(options: &LaunchOptions, ws_endpoint: Option<&str>) -> element_inspector::Result<InspectorServer> {
    match ws_endpoint {
        Some(url) => Ok(InspectorServer::with_session(BrowserSession::connect(ConnectionOptions::new(url))?)),
        None => InspectorServer::with_options(options.clone()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol on stdio, so logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.launch_options();

    log::info!("Element inspector MCP server v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Browser mode: {}", if options.headless { "headless" } else { "headed" });
    if let Some(endpoint) = &cli.ws_endpoint {
        log::info!("Attaching to browser at {}", endpoint);
    }

    match cli.transport {
        Transport::Stdio => {
            let service = start_server(&options, cli.ws_endpoint.as_deref()).context("Failed to start browser")?;
            log::info!("Ready to accept MCP connections via stdio");

            let server = service.serve(stdio()).await?;
            let quit_reason = server.waiting().await?;
            log::info!("Server quit with reason: {:?}", quit_reason);

            // Let the browser process shut down before exiting
            tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
        }
        Transport::Http => {
            let bind_addr = format!("127.0.0.1:{}", cli.port);
            let ws_endpoint = cli.ws_endpoint.clone();

            let service_factory = move || {
                start_server(&options, ws_endpoint.as_deref()).map_err(|e| std::io::Error::other(e.to_string()))
            };

            let http_service =
                StreamableHttpService::new(service_factory, LocalSessionManager::default().into(), Default::default());
            let router = axum::Router::new().nest_service(&cli.http_path, http_service);

            log::info!("Ready to accept MCP connections at http://{}{}", bind_addr, cli.http_path);

            let listener = tokio::net::TcpListener::bind(&bind_addr)
                .await
                .with_context(|| format!("Failed to bind {}", bind_addr))?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
