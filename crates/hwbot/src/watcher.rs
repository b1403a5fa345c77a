//! The polling loop: poll, validate, translate, notify, sleep.

use hwbot_core::{check_tokens, BotError, Config, ConfigError, ErrorKind};
use hwbot_practicum::{
    build_client, check_response, current_date, get_api_answer, parse_status, ApiAnswer,
};
use hwbot_telegram::TelegramBot;
use tokio::signal;
use tracing::{debug, error, info, warn};

/// How a cycle that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was delivered.
    Sent,
    /// The latest status matches the last delivered message.
    Unchanged,
    /// The endpoint reported no homework updates.
    NoUpdates,
    /// The endpoint could not be reached at all.
    Unavailable,
}

pub struct Watcher {
    config: Config,
    http_client: reqwest::Client,
    bot: TelegramBot,
    from_date: u64,
    last_message: Option<String>,
    last_error: Option<String>,
}

impl Watcher {
    /// Validate the configuration and build the clients.
    ///
    /// Missing tokens are a [`ConfigError::MissingTokens`] and no client is created.
    pub fn from_config(config: Config, from_date: u64) -> Result<Self, BotError> {
        if !check_tokens(&config) {
            return Err(ConfigError::MissingTokens(config.credentials.missing()).into());
        }
        let http_client = build_client(&config)?;
        let bot = TelegramBot::from_config(http_client.clone(), &config);

        Ok(Self {
            config,
            http_client,
            bot,
            from_date,
            last_message: None,
            last_error: None,
        })
    }

    /// Run cycles forever, sleeping `retry_time` after each one.
    /// Returns only when the process receives Ctrl-C.
    pub async fn run(&mut self) {
        info!(
            endpoint = %self.config.endpoint,
            chat_id = %self.bot.chat_id(),
            retry_secs = self.config.retry_time.as_secs(),
            "Watching homework statuses"
        );

        loop {
            self.tick().await;

            match tokio::time::timeout(self.config.retry_time, signal::ctrl_c()).await {
                Ok(Ok(())) => {
                    info!("Shutdown signal received, stopping");
                    return;
                }
                Ok(Err(e)) => {
                    error!("Failed to listen for the shutdown signal: {}", e);
                    return;
                }
                Err(_) => {
                    // Interval elapsed, next cycle.
                }
            }
        }
    }

    /// Run one cycle and absorb its failure, if any.
    pub async fn tick(&mut self) -> Option<CycleOutcome> {
        match self.cycle().await {
            Ok(outcome) => {
                debug!(?outcome, "Cycle finished");
                self.last_error = None;
                Some(outcome)
            }
            Err(e) => {
                self.report(e).await;
                None
            }
        }
    }

    /// One poll of the endpoint. The cursor only advances when the whole
    /// cycle succeeds, so a failed cycle is retried over the same window.
    pub async fn cycle(&mut self) -> Result<CycleOutcome, BotError> {
        let body = match get_api_answer(&self.http_client, &self.config, self.from_date).await? {
            ApiAnswer::Body(body) => body,
            ApiAnswer::Unavailable { reason } => {
                error!(endpoint = %self.config.endpoint, "Endpoint unavailable: {}", reason);
                return Ok(CycleOutcome::Unavailable);
            }
        };

        let homeworks = check_response(&body)?;
        let outcome = match homeworks.first() {
            None => {
                debug!("No homework status updates");
                CycleOutcome::NoUpdates
            }
            Some(record) => {
                let message = parse_status(record)?;
                if self.last_message.as_deref() == Some(message.as_str()) {
                    debug!("Status unchanged, nothing to send");
                    CycleOutcome::Unchanged
                } else {
                    self.bot.send_message(&message).await?;
                    info!("Homework status change delivered");
                    self.last_message = Some(message);
                    CycleOutcome::Sent
                }
            }
        };

        match current_date(&body).map(u64::try_from) {
            Some(Ok(date)) => self.from_date = date,
            _ => warn!("Response has no usable current_date, keeping from_date {}", self.from_date),
        }

        Ok(outcome)
    }

    async fn report(&mut self, err: BotError) {
        error!(kind = err.kind().as_str(), "Cycle failed: {}", err);

        if err.kind() != ErrorKind::Send {
            return;
        }

        // A failed delivery gets one short notice per distinct failure.
        let notice = format!("Сбой в работе программы: {}", err);
        if self.last_error.as_deref() == Some(notice.as_str()) {
            return;
        }
        match self.bot.send_message(&notice).await {
            Ok(()) => self.last_error = Some(notice),
            Err(e) => debug!("Failure notice was not delivered either: {}", e),
        }
    }
}
