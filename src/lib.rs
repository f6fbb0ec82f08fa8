//! uishot
//!
//! A headless element-screenshot verification utility: open a local HTML
//! page in a headless Chromium-compatible browser, wait for a selector to
//! become visible, and save a PNG cropped to that element's bounding box.
//!
//! The shipped binary runs one fixed verification: `index.html` in the
//! working directory, selector `#main-menu`, output `reset-button.png`.
//! The library surface underneath is reusable for other targets.
//!
//! # Example
//!
//! ```no_run
//! use uishot::runner::{self, CaptureTarget};
//! use uishot::SessionConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> uishot::Result<()> {
//! let output = runner::run(&CaptureTarget::default(), SessionConfig::default()).await?;
//! println!("wrote {}", output.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

// Synchronous engine over the Chrome DevTools Protocol
pub mod cdp;

// Async-friendly browser facade (worker-backed abstraction)
pub mod session;

// The verification run itself
pub mod runner;

// Re-export the session handles at the crate root for ergonomic use
pub use session::{Browser, Page};

/// Configuration for a browser session
///
/// Defaults are conservative: a 1280x720 viewport and a 30 second
/// visibility-wait deadline, matching what browser-automation libraries
/// commonly apply when nothing is configured.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Viewport dimensions (also the headless window size)
    pub viewport: Viewport,
    /// Deadline for the element-visibility wait in milliseconds
    pub timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            timeout_ms: 30000,
        }
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.viewport.width, 1280);
        assert_eq!(config.viewport.height, 720);
        assert_eq!(config.timeout_ms, 30000);
    }

    #[test]
    fn test_viewport() {
        let viewport = Viewport {
            width: 1920,
            height: 1080,
        };
        assert_eq!(viewport.width, 1920);
        assert_eq!(viewport.height, 1080);
    }
}
