//! hwbot - Telegram notifications about homework review status changes.
//!
//! Polls the Practicum homework statuses API every `RETRY_TIME` seconds and
//! forwards each status change to a single Telegram chat.

use chrono::Utc;
use hwbot_core::{tracing_setup, BotError, Config, LogConfig};
use std::process::ExitCode;
use tracing::{error, info};

mod watcher;

use watcher::Watcher;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Held until main returns so buffered log lines reach the file.
    let _log_guard = match tracing_setup::init(&LogConfig::from_env()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("hwbot: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match start().await {
        Ok(()) => {
            info!("Bot stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = e.kind().as_str(), "Critical: {}. Bot stopped.", e);
            ExitCode::FAILURE
        }
    }
}

async fn start() -> Result<(), BotError> {
    let config = Config::from_env()?;
    info!(credentials = ?config.credentials, "Starting homework status bot");

    let from_date = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    let mut watcher = Watcher::from_config(config, from_date)?;
    watcher.run().await;
    Ok(())
}
