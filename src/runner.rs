//! The verification run: one scoped browser session, one element screenshot.

use crate::session::Browser;
use crate::{Error, Result, SessionConfig};
use log::info;
use std::path::{Path, PathBuf};
use url::Url;

/// What to capture: which local page, which element, where to write the PNG.
#[derive(Debug, Clone)]
pub struct CaptureTarget {
    /// Local HTML document, resolved against the working directory
    pub page: PathBuf,
    /// CSS selector of the element to screenshot
    pub selector: String,
    /// Output path; overwritten silently on every run
    pub output: PathBuf,
}

impl Default for CaptureTarget {
    fn default() -> Self {
        Self {
            page: PathBuf::from("index.html"),
            selector: "#main-menu".to_string(),
            output: PathBuf::from("reset-button.png"),
        }
    }
}

/// Build a `file://` URL for the page. The path is resolved lexically
/// against the working directory; whether the file exists is left for the
/// browser to discover as a navigation error.
fn file_url(page: &Path) -> Result<Url> {
    let absolute = if page.is_absolute() {
        page.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| Error::Other(format!("Cannot determine working directory: {}", e)))?
            .join(page)
    };

    Url::from_file_path(&absolute)
        .map_err(|_| Error::Other(format!("Not a valid file path: {}", absolute.display())))
}

/// Run one verification: navigate, wait for the element, screenshot it,
/// write the PNG, confirm on stdout. Returns the output path.
///
/// The browser session is scoped to this call: it is closed whether the
/// capture succeeds or fails, and a dropped session tears the browser
/// process down on its own.
pub async fn run(target: &CaptureTarget, config: SessionConfig) -> Result<PathBuf> {
    let url = file_url(&target.page)?;
    let timeout_ms = config.timeout_ms;

    let browser = Browser::launch(config).await?;
    let captured = capture(&browser, &url, target, timeout_ms).await;
    let closed = browser.close().await;

    let output = captured?;
    closed?;
    Ok(output)
}

async fn capture(
    browser: &Browser,
    url: &Url,
    target: &CaptureTarget,
    timeout_ms: u64,
) -> Result<PathBuf> {
    let page = browser.new_page().await?;

    info!("navigating to {}", url);
    page.goto(url.as_str()).await?;

    info!("waiting for {}", target.selector);
    page.wait_for_visible(&target.selector, timeout_ms).await?;

    let png = page.capture_element(&target.selector).await?;

    std::fs::write(&target.output, &png).map_err(|e| Error::Write {
        path: target.output.display().to_string(),
        source: e,
    })?;

    println!("Screenshot saved to {}", target.output.display());
    Ok(target.output.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target() {
        let target = CaptureTarget::default();
        assert_eq!(target.page, PathBuf::from("index.html"));
        assert_eq!(target.selector, "#main-menu");
        assert_eq!(target.output, PathBuf::from("reset-button.png"));
    }

    #[test]
    fn file_url_from_absolute_path() {
        let url = file_url(Path::new("/tmp/index.html")).unwrap();
        assert_eq!(url.as_str(), "file:///tmp/index.html");
    }

    #[test]
    fn file_url_resolves_relative_against_cwd() {
        let url = file_url(Path::new("index.html")).unwrap();
        assert_eq!(url.scheme(), "file");
        assert!(url.path().ends_with("/index.html"));
        // Lexical resolution only: building the URL must not require the
        // file to exist
        assert!(url.path().starts_with('/'));
    }
}
