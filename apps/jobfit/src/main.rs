use std::sync::Arc;

use anyhow::Result;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobfit::analysis::HttpAnalysisClient;
use jobfit::app::App;
use jobfit::config::Config;
use jobfit::view::terminal::TerminalViewport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // stdout belongs to the form, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting JobFit client v{}", env!("CARGO_PKG_VERSION"));

    let service = HttpAnalysisClient::new(config.endpoint.clone(), config.request_timeout)?;
    info!(
        "Analysis endpoint: {} (timeout: {:?})",
        service.endpoint(),
        config.request_timeout
    );

    let viewport = Arc::new(TerminalViewport::new(std::io::stdout()));
    let app = App::new(Arc::new(service), viewport, config.reveal_delay);

    app.run(BufReader::new(tokio::io::stdin()), std::io::stdout())
        .await
}
