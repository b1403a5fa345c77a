//! hwbot Core - Shared configuration, errors and types for the homework status bot.

pub mod config;
pub mod error;
pub mod tracing_setup;
pub mod types;

pub use config::{check_tokens, Config, Credentials, LogConfig};
pub use error::{BotError, ConfigError, DomainError, ErrorKind, ProtocolError};
pub use types::{HomeworkRecord, HomeworkStatus};
