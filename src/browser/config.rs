use std::path::PathBuf;

/// Idle timeout for launched and connected browsers, in milliseconds
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 60 * 60 * 1000;

/// Options for launching a new browser instance
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Run without a visible window
    pub headless: bool,

    pub window_width: u32,

    pub window_height: u32,

    /// Chrome/Chromium binary; auto-detected when unset
    pub chrome_path: Option<PathBuf>,

    /// Persistent profile directory
    pub user_data_dir: Option<PathBuf>,

    pub sandbox: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 720,
            chrome_path: None,
            user_data_dir: None,
            sandbox: true,
        }
    }
}

impl LaunchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Builder method: set window size
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Builder method: set Chrome binary path
    pub fn chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Builder method: set user data directory
    pub fn user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(dir.into());
        self
    }

    /// Builder method: set sandbox mode
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }
}

/// Options for connecting to a running browser over its DevTools WebSocket
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    pub ws_url: String,

    /// How long the connection may sit without DevTools traffic before it is
    /// dropped, in milliseconds. Defaults to one hour, like launched browsers.
    pub idle_timeout: u64,
}

impl ConnectionOptions {
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT_MS,
        }
    }

    /// Builder method: set the idle timeout in milliseconds
    pub fn idle_timeout(mut self, idle_timeout: u64) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_defaults() {
        let opts = LaunchOptions::default();
        assert!(opts.headless);
        assert!(opts.sandbox);
        assert_eq!((opts.window_width, opts.window_height), (1280, 720));
        assert!(opts.chrome_path.is_none());
    }

    #[test]
    fn test_launch_builder_paths() {
        let opts = LaunchOptions::new()
            .chrome_path("/usr/bin/chromium")
            .user_data_dir("/tmp/profile")
            .sandbox(false);

        assert_eq!(opts.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(opts.user_data_dir, Some(PathBuf::from("/tmp/profile")));
        assert!(!opts.sandbox);
    }
}
