//! Console trigger input

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::state::{AppState, Trigger};

/// Background task mapping stdin lines to start/reset triggers
pub async fn console_commands_task(state: Arc<AppState>) {
    info!("Starting console commands task (type `start` or `reset`)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }

                let Some(trigger) = Trigger::parse(&line) else {
                    warn!("Unknown command {:?}, expected `start` or `reset`", line.trim());
                    continue;
                };

                if let Err(e) = state.trigger(trigger).await {
                    error!("Failed to handle {} trigger: {}", trigger.as_str(), e);
                    break;
                }
            }
            Ok(None) => {
                info!("Console input closed");
                break;
            }
            Err(e) => {
                error!("Failed to read console input: {}", e);
                break;
            }
        }
    }
}
