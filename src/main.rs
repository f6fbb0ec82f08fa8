use uishot::runner::{self, CaptureTarget};
use uishot::SessionConfig;

#[tokio::main]
async fn main() {
    env_logger::init();

    // One fixed verification per invocation; no flags, no arguments.
    let target = CaptureTarget::default();
    if let Err(err) = runner::run(&target, SessionConfig::default()).await {
        eprintln!("uishot: {}", err);
        std::process::exit(1);
    }
}
