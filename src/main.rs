//! howler - role-aware autopilot for a browser social-deduction game.
//!
//! Main entry point: attaches to the game tab over the browser's debugging
//! protocol, wires the live page into the engine's control loop and exposes
//! the HTTP toggle surface.

mod cli;
mod server;
mod store;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use howler_dom::cdp::{CdpClient, LivePage};
use howler_engine::{BotConfig, BotController, BotStatus};

use cli::{Cli, Commands};

/// Get the .howler directory path.
fn howler_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".howler"))
        .unwrap_or_else(|| PathBuf::from(".howler"))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.howler/logs/ with daily rotation.
fn init_tracing() -> anyhow::Result<()> {
    let log_dir = howler_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("howler")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer guard alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let engine_config = match &cli.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };

    match cli.command {
        None => {
            run(
                engine_config,
                "http://127.0.0.1:9222".to_string(),
                String::new(),
                None,
                8600,
            )
            .await
        }
        Some(Commands::Run {
            endpoint,
            url_fragment,
            name,
            port,
        }) => run(engine_config, endpoint, url_fragment, name, port).await,
        Some(Commands::Status { port }) => status(port).await,
    }
}

/// Attach to the game tab and drive the control loop until ctrl-c.
async fn run(
    cfg: BotConfig,
    endpoint: String,
    url_fragment: String,
    name: Option<String>,
    port: u16,
) -> anyhow::Result<()> {
    info!("starting howler v{}", env!("CARGO_PKG_VERSION"));

    let prefs_path = store::default_path();
    let prefs = store::load(&prefs_path);
    let name = name.unwrap_or_else(|| prefs.name.clone());

    let client = CdpClient::connect(&endpoint).await?;
    let page_info = client.find_page(&url_fragment).await?;
    info!("attaching to tab: {}", page_info.url);
    let session = client.attach(&page_info.id).await?;
    let page = Arc::new(LivePage::new(session));

    let controller = Arc::new(BotController::new(page.clone(), cfg, &name));
    if prefs.running {
        info!("resuming from persisted preferences");
        controller.set_enabled(true);
    }

    let loop_handle = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.run().await })
    };
    let server_handle = tokio::spawn(server::serve(
        server::AppState {
            controller: controller.clone(),
            prefs_path,
        },
        port,
    ));

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    controller.stop();
    loop_handle.await?;
    server_handle.abort();
    if let Err(e) = page.detach().await {
        warn!("failed to detach from the game tab: {}", e);
    }
    Ok(())
}

/// Print a running instance's status.
async fn status(port: u16) -> anyhow::Result<()> {
    let url = format!("http://127.0.0.1:{}/status", port);
    let status: BotStatus = reqwest::get(&url).await?.json().await?;
    println!("enabled: {}", status.enabled);
    println!("name:    {}", status.name);
    Ok(())
}
