//! Dial Timer - A countdown timer with a circular dial
//!
//! This is the main entry point for the dial-timer application.

use std::{sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::watch};
use tracing::{info, warn};

use dial_timer::{
    api::create_router,
    config::Config,
    engine::{FinishNotifier, TimerSnapshot},
    services::{check_command_available, DesktopNotifier, LogNotifier},
    settings::TimerConfig,
    state::{AppState, SnapshotPublisher},
    tasks::spawn_engine,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("dial_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting dial-timer v{}", env!("CARGO_PKG_VERSION"));

    let settings_path = config.settings_path()?;
    let settings = TimerConfig::load(&settings_path);
    info!(
        "Configuration: host={}, port={}, default={}min, settings={}",
        config.host,
        config.port,
        settings.default_time,
        settings_path.display()
    );

    let notifier: Arc<dyn FinishNotifier> = if config.no_notify {
        Arc::new(LogNotifier)
    } else {
        if !check_command_available("notify-send").await {
            warn!("notify-send not found, finish notifications will fail");
        }
        Arc::new(DesktopNotifier::default())
    };

    // Channels between the engine and the control surface
    let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::idle(settings.default_time));
    let (settings_tx, settings_rx) = watch::channel(settings.clone());

    let (engine, engine_task) = spawn_engine(
        settings,
        notifier,
        Arc::new(SnapshotPublisher::new(snapshot_tx)),
        settings_rx,
    );

    let state = Arc::new(AppState::new(
        engine,
        snapshot_rx,
        settings_tx,
        settings_path,
        config.port,
        config.host.clone(),
    ));

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Control surface running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /toggle      - Start or pause");
    info!("  POST /reset       - Restore default time");
    info!("  POST /zero        - Clear the time");
    info!("  POST /nudge       - Shift by minutes");
    info!("  POST /time        - Set exact time");
    info!("  POST /scroll      - Feed a scroll delta");
    info!("  POST /click       - Click on the dial");
    info!("  POST /entry       - Edit numeric entry");
    info!("  POST /entry/open  - Open numeric entry");
    info!("  POST /entry/close - Close numeric entry");
    info!("  GET  /status      - Current timer snapshot");
    info!("  GET  /frame       - Rendered dial primitives");
    info!("  GET|PUT /preferences - Timer settings");
    info!("  GET  /health      - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // The router owned the last engine handle; the task stops once it is gone
    if tokio::time::timeout(Duration::from_secs(2), engine_task).await.is_err() {
        warn!("Engine task did not stop in time");
    }

    info!("Shutdown complete");
    Ok(())
}
