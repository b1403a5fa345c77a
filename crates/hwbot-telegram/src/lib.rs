//! hwbot Telegram - delivery of notifications through the Telegram Bot API.

use hwbot_core::{BotError, Config};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// A bot bound to the single chat it reports to.
#[derive(Clone)]
pub struct TelegramBot {
    http_client: reqwest::Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramBot {
    pub fn new(http_client: reqwest::Client, api_url: &str, token: &str, chat_id: &str) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    /// Create a bot from the loaded configuration.
    pub fn from_config(http_client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            http_client,
            &config.telegram_api_url,
            &config.credentials.telegram_token,
            &config.credentials.telegram_chat_id,
        )
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Send `text` to the configured chat. No retries.
    pub async fn send_message(&self, text: &str) -> Result<(), BotError> {
        debug!(chat_id = %self.chat_id, "Sending message to Telegram");

        match self.deliver(text).await {
            Ok(()) => {
                debug!(chat_id = %self.chat_id, text = %text, "Message sent");
                Ok(())
            }
            Err(reason) => {
                error!(chat_id = %self.chat_id, "Failed to send message: {}", reason);
                Err(BotError::Send {
                    chat_id: self.chat_id.clone(),
                    reason,
                })
            }
        }
    }

    async fn deliver(&self, text: &str) -> Result<(), String> {
        // The URL embeds the token; keep it out of error strings.
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);

        let response = self
            .http_client
            .post(&url)
            .json(&SendMessageRequest {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            .map_err(|e| e.without_url().to_string())?;

        let status = response.status();
        let reply: Option<ApiReply> = response.json().await.ok();
        match reply {
            Some(ApiReply { ok: true, .. }) if status.is_success() => Ok(()),
            Some(ApiReply {
                description: Some(description),
                ..
            }) => Err(format!("Bot API error ({}): {}", status, description)),
            _ => Err(format!("Bot API responded with status {}", status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::net::{SocketAddr, TcpListener};
    use std::sync::{Arc, Mutex};

    type Inbox = Arc<Mutex<Vec<Value>>>;

    async fn send_message_handler(
        State(inbox): State<Inbox>,
        Path(bot): Path<String>,
        Json(payload): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if bot != "bottest-token" {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"ok": false, "error_code": 401, "description": "Unauthorized"})),
            );
        }
        if payload["chat_id"] != "42" {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"ok": false, "error_code": 400, "description": "Bad Request: chat not found"})),
            );
        }
        inbox.lock().unwrap().push(payload);
        (StatusCode::OK, Json(json!({"ok": true, "result": {"message_id": 1}})))
    }

    fn spawn_bot_api() -> (SocketAddr, Inbox) {
        let inbox = Inbox::default();
        let app = Router::new()
            .route("/:bot/sendMessage", post(send_message_handler))
            .with_state(inbox.clone());
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(
            axum::Server::from_tcp(listener)
                .unwrap()
                .serve(app.into_make_service()),
        );
        (addr, inbox)
    }

    #[tokio::test]
    async fn test_send_message_delivers_text_to_chat() {
        let (addr, inbox) = spawn_bot_api();
        let bot = TelegramBot::new(reqwest::Client::new(), &format!("http://{}/", addr), "test-token", "42");

        bot.send_message("Работа взята на проверку ревьюером.").await.unwrap();

        let inbox = inbox.lock().unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0]["text"], "Работа взята на проверку ревьюером.");
    }

    #[tokio::test]
    async fn test_api_rejection_is_send_error() {
        let (addr, inbox) = spawn_bot_api();
        let bot = TelegramBot::new(reqwest::Client::new(), &format!("http://{}", addr), "test-token", "7");

        let err = bot.send_message("hello").await.unwrap_err();
        match err {
            BotError::Send { chat_id, reason } => {
                assert_eq!(chat_id, "7");
                assert!(reason.contains("chat not found"), "reason: {}", reason);
            }
            other => panic!("expected a send error, got {:?}", other),
        }
        assert!(inbox.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_hides_token() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let bot = TelegramBot::new(reqwest::Client::new(), &format!("http://{}", addr), "very-secret", "42");

        let err = bot.send_message("hello").await.unwrap_err();
        assert!(matches!(err, BotError::Send { .. }));
        assert!(!err.to_string().contains("very-secret"));
    }
}
