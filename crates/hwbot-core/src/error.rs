//! Error taxonomy shared by every hwbot crate.
//!
//! Only [`BotError::Config`] is fatal; every other variant is logged at the
//! watcher's loop boundary and the next cycle proceeds after the sleep.

use thiserror::Error;

/// Invalid or missing configuration detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingTokens(Vec<&'static str>),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to set up logging: {0}")]
    Logging(String),
}

/// The endpoint answered, but not in the documented way.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("endpoint unreachable, API responded with status {status}")]
    EndpointUnreachable { status: u16 },

    #[error("response body is not valid JSON: {reason}")]
    InvalidJson { reason: String },

    #[error("unexpected response shape: {reason}")]
    TypeMismatch { reason: String },
}

/// A homework record the bot cannot turn into a verdict.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("homework record is missing the {field:?} key")]
    MissingField { field: &'static str },

    #[error("unknown homework status {status:?}")]
    UnknownStatus { status: String },
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to send message to chat {chat_id}: {reason}")]
    Send { chat_id: String, reason: String },
}

/// Coarse classification used when logging a failed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Transport,
    Protocol,
    Domain,
    Send,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::Transport => "transport",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Domain => "domain",
            ErrorKind::Send => "send",
        }
    }
}

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::Config(_) => ErrorKind::Config,
            BotError::Transport(_) => ErrorKind::Transport,
            BotError::Protocol(_) => ErrorKind::Protocol,
            BotError::Domain(_) => ErrorKind::Domain,
            BotError::Send { .. } => ErrorKind::Send,
        }
    }

    /// Whether the process must stop. Everything but configuration errors
    /// is recovered from by the next cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BotError::Config(_))
    }
}
