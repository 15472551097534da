use crate::{browser::config::{ConnectionOptions, DEFAULT_IDLE_TIMEOUT_MS, LaunchOptions},
            dom::{ElementDescriptor, PageDocument},
            error::{InspectorError, Result},
            highlight::{HighlightStyle, Highlighter, HighlighterMap, HighlighterRegistry, Inspector, PageHighlighter, annotate}};
use headless_chrome::{Browser, Tab, protocol::cdp::Page::CaptureScreenshotFormatOption};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that manages a Chrome/Chromium instance and the page highlighters
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// Highlighters created in this session, by id
    highlighters: HighlighterMap<PageHighlighter>,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Inspection sessions are long-lived; the default idle timeout is 30 seconds
        launch_opts.idle_browser_timeout = Duration::from_millis(DEFAULT_IDLE_TIMEOUT_MS);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| InspectorError::LaunchFailed(e.to_string()))?;

        browser
            .new_tab()
            .map_err(|e| InspectorError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::info!("Launched browser (headless: {})", options.headless);
        Ok(Self::with_browser(browser))
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url.clone(), Duration::from_millis(options.idle_timeout))
            .map_err(|e| InspectorError::ConnectionFailed(e.to_string()))?;

        log::info!("Connected to browser at {}", options.ws_url);
        Ok(Self::with_browser(browser))
    }

    fn with_browser(browser: Browser) -> Self {
        Self {
            browser,
            highlighters: HighlighterMap::new(),
        }
    }

    /// Get the active tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        self.get_active_tab()
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| InspectorError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking the document visibility and focus state
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        // Visible and focused is the strongest signal, visible alone the fallback
        for check in ["document.visibilityState === 'visible' && document.hasFocus()", "document.visibilityState === 'visible'"] {
            for tab in &tabs {
                match tab.evaluate(check, false) {
                    Ok(remote_object) => {
                        if remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                    Err(e) => {
                        log::debug!("Failed to check tab status: {}", e);
                    }
                }
            }
        }

        // A single tab is active even when the window is hidden
        match tabs.as_slice() {
            [only] => Ok(only.clone()),
            _ => Err(InspectorError::TabOperationFailed("No active tab found".to_string())),
        }
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate to a URL using the active tab
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| InspectorError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| InspectorError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Document view of the active tab
    pub fn document(&self) -> Result<PageDocument> {
        Ok(PageDocument::new(self.tab()?))
    }

    /// Create a highlighter overlay in the active tab
    pub fn create_highlighter(&mut self, id: &str, style: HighlightStyle) -> Result<()> {
        if self.highlighters.contains(id) {
            return Err(InspectorError::HighlighterExists(id.to_string()));
        }

        let highlighter = PageHighlighter::create(self.document()?, id, style)?;
        self.highlighters.insert(id, highlighter)
    }

    /// Remove a highlighter and its overlay
    pub fn remove_highlighter(&mut self, id: &str) -> Result<()> {
        let highlighter = self
            .highlighters
            .remove(id)
            .ok_or_else(|| InspectorError::HighlighterNotFound(id.to_string()))?;
        highlighter.remove()
    }

    pub fn highlighters(&self) -> &HighlighterMap<PageHighlighter> {
        &self.highlighters
    }

    /// Whether a highlighter in this session currently has a target
    pub fn has_highlighter_target(&self, id: &str) -> bool {
        self.highlighters
            .highlighter(id)
            .is_some_and(|h| h.target().is_some())
    }

    /// Forget every highlighter target, returning how many had one.
    ///
    /// Node handles do not survive navigation, so this runs after the page changes.
    pub fn reset_highlighter_targets(&mut self) -> usize {
        self.highlighters.values_mut().map(|h| h.forget_target()).filter(|&had| had).count()
    }

    /// Inspector over the active tab and this session's highlighters
    pub fn inspector(&mut self) -> Result<Inspector<PageDocument, &mut HighlighterMap<PageHighlighter>>> {
        let document = self.document()?;
        Ok(Inspector::new(document, &mut self.highlighters))
    }

    /// Capture the visible viewport as PNG
    pub fn screenshot(&self) -> Result<Vec<u8>> {
        self.tab()?
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| InspectorError::ScreenshotFailed(e.to_string()))
    }

    /// Capture the viewport with the given elements outlined
    pub fn annotated_screenshot(&self, elements: &[ElementDescriptor]) -> Result<Vec<u8>> {
        let png = self.screenshot()?;
        let scale = device_scale(self.document()?.call("window.devicePixelRatio || 1"));
        let rects: Vec<_> = elements.iter().map(|e| e.rect).collect();
        annotate::outline_rects(&png, &rects, scale, annotate::OUTLINE_COLOR)
    }

    /// Remove every highlighter overlay and close all tabs
    pub fn close(&mut self) -> Result<()> {
        for id in self.highlighters.ids().map(str::to_string).collect::<Vec<_>>() {
            if let Some(highlighter) = self.highlighters.remove(&id) {
                if let Err(e) = highlighter.remove() {
                    log::debug!("Failed to remove highlighter '{}': {}", id, e);
                }
            }
        }

        for tab in self.get_tabs()? {
            let _ = tab.close(false); // Ignore errors on individual tab closes
        }
        Ok(())
    }
}

impl std::fmt::Debug for BrowserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserSession")
            .field("highlighters", &self.highlighters.ids().collect::<Vec<_>>())
            .finish()
    }
}

/// Screenshot pixels per CSS pixel, 1 when the page can't tell
fn device_scale(ratio: Result<f64>) -> f64 {
    match ratio {
        Ok(scale) if scale.is_finite() && scale > 0.0 => scale,
        Ok(scale) => {
            log::debug!("Ignoring devicePixelRatio {}, assuming 1", scale);
            1.0
        }
        Err(e) => {
            log::debug!("Failed to read devicePixelRatio, assuming 1: {}", e);
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_builder() {
        let opts = LaunchOptions::new().headless(true).window_size(800, 600);

        assert!(opts.headless);
        assert_eq!(opts.window_width, 800);
        assert_eq!(opts.window_height, 600);
    }

    #[test]
    fn test_connection_options() {
        let opts = ConnectionOptions::new("ws://localhost:9222").idle_timeout(5000);

        assert_eq!(opts.ws_url, "ws://localhost:9222");
        assert_eq!(opts.idle_timeout, 5000);
    }

    #[test]
    fn test_connection_idle_timeout_defaults_to_launch() {
        let opts = ConnectionOptions::new("ws://localhost:9222");
        assert_eq!(opts.idle_timeout, DEFAULT_IDLE_TIMEOUT_MS);
        assert_eq!(Duration::from_millis(opts.idle_timeout), Duration::from_secs(60 * 60));
    }

    #[test]
    fn test_device_scale_falls_back_to_one() {
        assert_eq!(device_scale(Ok(2.0)), 2.0);
        assert_eq!(device_scale(Ok(0.0)), 1.0);
        assert_eq!(device_scale(Err(InspectorError::EvaluationFailed("detached".into()))), 1.0);
    }

    // Integration tests (require Chrome to be installed)
    #[test]
    #[ignore] // Ignore by default, run with: cargo test -- --ignored
    fn test_launch_browser() {
        let result = BrowserSession::launch(LaunchOptions::new().headless(true));
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_get_active_tab() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let tab = session.get_active_tab();
        assert!(tab.is_ok());
    }

    #[test]
    #[ignore]
    fn test_create_and_remove_highlighter() {
        let mut session =
            BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
        session.navigate("data:text/html,<p id='x'>hi</p>").expect("Failed to navigate");
        session.wait_for_navigation().expect("Navigation did not complete");

        session.create_highlighter("main", HighlightStyle::default()).unwrap();
        assert!(matches!(
            session.create_highlighter("main", HighlightStyle::default()),
            Err(InspectorError::HighlighterExists(_))
        ));
        assert!(!session.has_highlighter_target("main"));

        session.inspector().unwrap().highlight_element_for_selector("main", "#x").unwrap();
        assert!(session.has_highlighter_target("main"));

        session.remove_highlighter("main").unwrap();
        assert!(session.highlighters().is_empty());
    }
}
