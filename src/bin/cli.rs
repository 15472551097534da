//! Command-line element inspector
//!
//! Describes elements and element subtrees of an HTML file (parsed offline)
//! or of a live page loaded in Chrome/Chromium, printing JSON.

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use element_inspector::dom::{
    Document, LightChildren, PageSnapshot, Point, Rect, ShadowIncludingChildren, SnapshotNode, TreeFilter,
};
use element_inspector::highlight::{
    HighlightStyle, Highlighter, HighlighterMap, HighlighterRegistry, Inspector, OverlayHighlighter,
};
use element_inspector::tools::utils::normalize_url;
use element_inspector::{BrowserSession, LaunchOptions};
use serde_json::{Value, json};
use std::path::PathBuf;

const HIGHLIGHTER_ID: &str = "cli";

#[derive(Parser)]
#[command(name = "element-inspector")]
#[command(version)]
#[command(about = "Describe page elements and element subtrees", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: Source,

    /// Layout rectangle for an HTML file element, as SELECTOR=TOP,LEFT,WIDTH,HEIGHT (repeatable)
    #[arg(long = "rect", value_name = "SPEC", value_parser = parse_rect)]
    rects: Vec<(String, Rect)>,

    /// Viewport of an HTML file, as WIDTHxHEIGHT
    #[arg(long, value_name = "SIZE", value_parser = parse_viewport)]
    viewport: Option<(f64, f64)>,

    /// Launch the browser with a visible window
    #[arg(long, short = 'H')]
    headed: bool,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// HTML file to inspect offline
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Page to load in Chrome and inspect
    #[arg(long, value_name = "URL")]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Describe the first element matching a selector
    Data {
        selector: String,

        /// Describe every match in document order
        #[arg(long)]
        all: bool,
    },
    /// Print the element tree under a root element
    Tree {
        #[arg(long, default_value = "body")]
        root: String,

        /// Keep only children matching this selector
        #[arg(long)]
        filter: Option<String>,

        /// Walk shadow roots before light children
        #[arg(long)]
        shadow: bool,
    },
    /// Describe the topmost element at a viewport point
    AtPoint { x: f64, y: f64 },
    /// Describe descendants of the element matching TARGET that match SELECTOR
    Children { target: String, selector: String },
}

fn parse_rect(value: &str) -> Result<(String, Rect), String> {
    let (selector, numbers) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected SELECTOR=TOP,LEFT,WIDTH,HEIGHT, got '{}'", value))?;

    let numbers = numbers
        .split(',')
        .map(|n| n.trim().parse::<f64>().map_err(|e| format!("invalid number '{}': {}", n, e)))
        .collect::<Result<Vec<_>, _>>()?;

    match numbers.as_slice() {
        [top, left, width, height] => Ok((selector.trim().to_string(), Rect::new(*top, *left, *width, *height))),
        _ => Err(format!("expected 4 numbers, got {}", numbers.len())),
    }
}

fn parse_viewport(value: &str) -> Result<(f64, f64), String> {
    let (width, height) = value
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;
    let width = width.parse::<f64>().map_err(|e| e.to_string())?;
    let height = height.parse::<f64>().map_err(|e| e.to_string())?;
    Ok((width, height))
}

/// Run a command against any document, using the `cli` highlighter for targeting
fn run<D, R>(inspector: &mut Inspector<D, R>, command: &Command) -> anyhow::Result<Value>
where
    D: Document,
    R: HighlighterRegistry,
    R::Highlighter: Highlighter<Node = D::Node>,
{
    let value = match command {
        Command::Data { selector, all: false } => serde_json::to_value(inspector.element_data(selector.as_str())?)?,
        Command::Data { selector, all: true } => {
            let Some(root) = inspector.document().query_selector(":root")? else {
                return Ok(json!([]));
            };
            let matches = inspector.document().query_selector_all(&root, selector)?;
            serde_json::to_value(inspector.elements_data(matches)?)?
        }
        Command::Tree { root, filter, shadow } => {
            let filter = filter.as_deref().map_or(TreeFilter::All, TreeFilter::selector);
            let tree = if *shadow {
                inspector.element_node_tree_data(&ShadowIncludingChildren, root.as_str(), &filter)?
            } else {
                inspector.element_node_tree_data(&LightChildren, root.as_str(), &filter)?
            };
            serde_json::to_value(tree)?
        }
        Command::AtPoint { x, y } => {
            inspector.highlight_element_at_point(HIGHLIGHTER_ID, Point::new(*x, *y))?;
            serde_json::to_value(inspector.get_highlighter_target_data(HIGHLIGHTER_ID)?)?
        }
        Command::Children { target, selector } => {
            inspector.highlight_element_for_selector(HIGHLIGHTER_ID, target)?;
            serde_json::to_value(inspector.get_highlighter_target_children_data(HIGHLIGHTER_ID, selector)?)?
        }
    };
    Ok(value)
}

fn inspect_file(cli: &Cli, path: &PathBuf) -> anyhow::Result<Value> {
    let html = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let mut page = PageSnapshot::parse(&html);
    if let Some((width, height)) = cli.viewport {
        page = page.with_viewport(width, height);
    }
    for (selector, rect) in &cli.rects {
        page.set_rect(selector, *rect)?;
    }

    let mut highlighters: HighlighterMap<OverlayHighlighter<SnapshotNode>> = HighlighterMap::new();
    highlighters.insert(HIGHLIGHTER_ID, OverlayHighlighter::new())?;

    let mut inspector = Inspector::new(&page, highlighters);
    run(&mut inspector, &cli.command)
}

fn inspect_url(cli: &Cli, url: &str) -> anyhow::Result<Value> {
    if !cli.rects.is_empty() || cli.viewport.is_some() {
        bail!("--rect and --viewport only apply to --file; a live page has its own layout");
    }

    let mut session = BrowserSession::launch(LaunchOptions::new().headless(!cli.headed))?;
    session.navigate(&normalize_url(url))?;
    session.wait_for_navigation()?;
    session.create_highlighter(HIGHLIGHTER_ID, HighlightStyle::default())?;

    let result = run(&mut session.inspector()?, &cli.command);
    if let Err(e) = session.close() {
        log::debug!("Failed to close browser session: {}", e);
    }
    result
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let value = match (&cli.source.file, &cli.source.url) {
        (Some(path), _) => inspect_file(&cli, path)?,
        (None, Some(url)) => inspect_url(&cli, url)?,
        (None, None) => bail!("either --file or --url is required"),
    };

    let output = if cli.compact { serde_json::to_string(&value)? } else { serde_json::to_string_pretty(&value)? };
    println!("{}", output);
    Ok(())
}
