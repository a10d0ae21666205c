use aw_core::{LogNotificationSink, Orchestrator, ShutdownCoordinator};
use aw_power::{OFFLINE_STATUS, PanelClient, PowerControl};
use aw_proto::Prober;
use aw_server::config::load_power_config;
use aw_server::{AppState, ConfigLoader, build_router, logger};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = aw_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = aw_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting aw-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let power_config = aw_server::config::power_config(&config);
    power_config.validate()?;

    // Control API client, checked once at boot
    let panel = Arc::new(PanelClient::new(
        &power_config.control_endpoint,
        &power_config.credentials,
    ));
    let boot_status = panel.query_status(&power_config.server_id).await;
    if boot_status == OFFLINE_STATUS {
        warn!(
            "Control API at {} reports server {} as offline or could not be reached",
            power_config.control_endpoint, power_config.server_id
        );
    } else {
        info!(
            "Control API reachable, server {} is '{}'",
            power_config.server_id, boot_status
        );
    }

    let prober = Arc::new(Prober::new(config.target.protocol_version));
    let orchestrator = Orchestrator::new(
        power_config,
        prober,
        panel,
        Arc::new(LogNotificationSink),
    );
    orchestrator.start().await;

    let shutdown = ShutdownCoordinator::new();
    let config_loader: ConfigLoader = Arc::new(load_power_config);

    let app_state = AppState {
        orchestrator: orchestrator.clone(),
        shutdown: shutdown.clone(),
        config_loader,
    };

    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Admin API listening on {}", actual_addr);

    // Write port discovery file for CLI auto-discovery
    match aw_config::PortFileInfo::write(actual_addr.port(), &config.server.host) {
        Ok(path) => info!("Port file written: {}", path.display()),
        Err(e) => warn!(
            "Failed to write port file (CLI auto-discovery may not work): {}",
            e
        ),
    }

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    info!("Server ready to accept requests");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.subscribe_guard().wait().await;
            info!("HTTP server stopped accepting requests");
        })
        .await?;

    orchestrator.on_teardown().await;

    // Clean up port discovery file
    if let Err(e) = aw_config::PortFileInfo::remove() {
        warn!("Failed to remove port file: {}", e);
    }

    info!("Graceful shutdown complete");
    Ok(())
}
