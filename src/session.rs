use crate::cdp::CdpEngine;
use crate::{Error, Result, SessionConfig};
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    Goto(String, oneshot::Sender<Result<()>>),
    WaitForVisible(String, u64, oneshot::Sender<Result<()>>),
    CaptureElement(String, oneshot::Sender<Result<Vec<u8>>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An async-friendly browser handle backed by a dedicated worker thread.
///
/// The worker thread owns a synchronous `CdpEngine` and executes commands
/// sent from async tasks, so callers get an async interface without the
/// engine having to be `Send` across tasks. If the handle is dropped
/// without `close()` the command channel disconnects, the worker loop ends,
/// and the engine drop kills the browser process.
#[derive(Clone)]
pub struct Browser {
    cmd_tx: Sender<Command>,
}

/// A handle representing the session's page.
#[derive(Clone)]
pub struct Page {
    cmd_tx: Sender<Command>,
}

impl Browser {
    /// Launch a browser (spawns a background thread that owns the engine).
    pub async fn launch(config: SessionConfig) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            // Initialize engine on the worker thread
            let engine = match CdpEngine::new(&config) {
                Ok(e) => e,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };

            let _ = init_tx.send(Ok(()));

            // Command loop; ends on Close or when every handle is dropped
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Goto(url, resp) => {
                        let res = engine.load_url(&url);
                        let _ = resp.send(res);
                    }
                    Command::WaitForVisible(selector, timeout_ms, resp) => {
                        let res = engine.wait_for_visible(&selector, timeout_ms);
                        let _ = resp.send(res);
                    }
                    Command::CaptureElement(selector, resp) => {
                        let res = engine.capture_element(&selector);
                        let _ = resp.send(res);
                    }
                    Command::Close(resp) => {
                        let res = engine.close();
                        let _ = resp.send(res);
                        break;
                    }
                }
            }
        });

        // Wait for the worker to report initialization success or failure
        let init_res = init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))?;
        init_res?;

        Ok(Self { cmd_tx })
    }

    /// Open a page handle backed by the same worker thread.
    pub async fn new_page(&self) -> Result<Page> {
        Ok(Page {
            cmd_tx: self.cmd_tx.clone(),
        })
    }

    /// Shutdown the background worker and close the browser.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?
    }
}

impl Page {
    /// Navigate to a URL
    pub async fn goto(&self, url: &str) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Goto(url.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("Goto canceled: {}", e)))?
    }

    /// Wait until the selector is present and visible
    pub async fn wait_for_visible(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self
            .cmd_tx
            .send(Command::WaitForVisible(selector.to_string(), timeout_ms, tx));
        rx.await
            .map_err(|e| Error::Other(format!("WaitForVisible canceled: {}", e)))?
    }

    /// Capture a PNG of the element matching the selector
    pub async fn capture_element(&self, selector: &str) -> Result<Vec<u8>> {
        let (tx, rx) = oneshot::channel();
        let _ = self
            .cmd_tx
            .send(Command::CaptureElement(selector.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("CaptureElement canceled: {}", e)))?
    }
}
