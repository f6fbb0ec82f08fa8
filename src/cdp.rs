//! Chrome DevTools Protocol engine implementation

use crate::{Error, Result, SessionConfig};
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use log::{debug, warn};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How often the visibility probe re-runs while waiting
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What the in-page probe reports about the target element
#[derive(Deserialize)]
struct ProbeReport {
    found: bool,
    visible: bool,
    width: f64,
    height: f64,
}

/// JavaScript probe evaluated in the page. Reports whether a node matching
/// the selector exists and is actually visible (non-empty box, not hidden
/// via `display` or `visibility`). Presence alone is not enough.
///
/// The probe is built from a template and the selector is substituted as a
/// JSON string literal, so arbitrary selectors cannot break out of the
/// script.
const PROBE_TEMPLATE: &str = r#"
(() => {
    const el = document.querySelector({{SELECTOR_TOKEN}});
    if (!el) {
        return JSON.stringify({ found: false, visible: false, width: 0, height: 0 });
    }
    const rect = el.getBoundingClientRect();
    const style = getComputedStyle(el);
    const visible = rect.width >= 1 && rect.height >= 1
        && style.display !== 'none'
        && style.visibility !== 'hidden';
    return JSON.stringify({ found: true, visible: visible, width: rect.width, height: rect.height });
})()
"#;

fn probe_script(selector: &str) -> String {
    // Value::String renders as a quoted, escaped JSON string
    let literal = serde_json::Value::String(selector.to_string()).to_string();
    PROBE_TEMPLATE.replace("{{SELECTOR_TOKEN}}", &literal)
}

/// Synchronous CDP engine (uses the `headless_chrome` crate)
///
/// Launches one headless Chrome instance and manages a single tab. The
/// browser process is killed when the engine is dropped, so no run can
/// leave a Chrome behind regardless of which step failed.
pub struct CdpEngine {
    browser: Browser,
    tab: Arc<Tab>,
}

impl CdpEngine {
    /// Launch a headless browser and open one tab
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((config.viewport.width, config.viewport.height)))
            .build()
            .map_err(|e| Error::Launch(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::Launch(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::Launch(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, tab })
    }

    /// Navigate the tab and block until the navigation completes
    pub fn load_url(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| Error::Navigation(format!("{}", e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::Navigation(format!("Wait for navigation failed: {}", e)))?;

        Ok(())
    }

    /// Block until the selector is present and visible, or the deadline
    /// elapses
    pub fn wait_for_visible(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let script = probe_script(selector);
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);

        loop {
            let eval = self
                .tab
                .evaluate(&script, false)
                .map_err(|e| Error::Other(format!("Visibility probe failed: {}", e)))?;

            let report = match eval.value {
                Some(serde_json::Value::String(s)) => serde_json::from_str::<ProbeReport>(&s)
                    .map_err(|e| Error::Other(format!("Malformed probe report: {}", e)))?,
                other => {
                    return Err(Error::Other(format!(
                        "Unexpected probe result: {:?}",
                        other
                    )))
                }
            };

            if report.found && report.visible {
                debug!(
                    "{} visible at {:.0}x{:.0}",
                    selector, report.width, report.height
                );
                return Ok(());
            }

            if Instant::now() >= deadline {
                if report.found {
                    warn!("{} is present but never became visible", selector);
                }
                return Err(Error::VisibilityTimeout {
                    selector: selector.to_string(),
                    timeout_ms,
                });
            }

            std::thread::sleep(POLL_INTERVAL);
        }
    }

    /// Capture a PNG cropped to the element's rendered bounding box
    pub fn capture_element(&self, selector: &str) -> Result<Vec<u8>> {
        let element = self
            .tab
            .find_element(selector)
            .map_err(|e| Error::Capture(format!("Element {:?} not found: {}", selector, e)))?;

        let png = element
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png)
            .map_err(|e| Error::Capture(format!("{}", e)))?;

        Ok(png)
    }

    /// Close the engine; the browser process terminates with it
    pub fn close(self) -> Result<()> {
        // Drop tab before browser so the child process exits promptly
        drop(self.tab);
        drop(self.browser);
        Ok(())
    }
}
