//! Tomato Timer - A Pomodoro interval timer
//!
//! This is the main entry point for the tomato-timer application.

use std::sync::Arc;
use anyhow::anyhow;
use tokio::net::TcpListener;
use tracing::info;

use tomato_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{console_commands_task, spawn_interval_driver, terminal_display_task, TICK_PERIOD},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so they do not tear the terminal display line
    tracing_subscriber::fmt()
        .with_env_filter(format!("tomato_timer={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let durations = config.durations().map_err(|e| anyhow!(e))?;
    let cycle = config.cycle().map_err(|e| anyhow!(e))?;

    info!("Starting tomato-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: work={}s, short_break={}s, long_break={}s, cycle={}",
          durations.work(), durations.short_break(), durations.long_break(), cycle);

    // Create application state and the interval driver that owns the timer
    let (state, commands) = AppState::new(config.port, config.host.clone(), durations, cycle);
    let _driver = spawn_interval_driver(&state, commands, TICK_PERIOD);
    let state = Arc::new(state);

    if !config.no_console {
        tokio::spawn(terminal_display_task(Arc::clone(&state)));
        tokio::spawn(console_commands_task(Arc::clone(&state)));
    }

    if config.no_http {
        shutdown_signal().await;
        info!("Shutdown signal received");
        return Ok(());
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Pomodoro control server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start the next interval");
    info!("  POST /reset  - Reset the timer");
    info!("  GET  /status - Current display and session state");
    info!("  GET  /health - Health check");

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

    info!("Shutdown complete");
    Ok(())
}
