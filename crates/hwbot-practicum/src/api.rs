//! Client side of the Practicum homework statuses endpoint.

use hwbot_core::{BotError, Config, ProtocolError};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

/// What one poll of the endpoint produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiAnswer {
    /// The endpoint answered 200 with a JSON body.
    Body(Value),
    /// The request never got an HTTP answer (timeout, DNS, refused).
    Unavailable { reason: String },
}

/// Build the HTTP client shared by the poller and the Telegram bot.
pub fn build_client(config: &Config) -> Result<reqwest::Client, BotError> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.request_timeout)
        .build()?;
    Ok(client)
}

/// Ask the endpoint for homework updates since `since_timestamp`.
///
/// Non-200 answers are a [`ProtocolError::EndpointUnreachable`]; transport
/// failures are logged and returned as [`ApiAnswer::Unavailable`].
pub async fn get_api_answer(
    client: &reqwest::Client,
    config: &Config,
    since_timestamp: u64,
) -> Result<ApiAnswer, BotError> {
    debug!(endpoint = %config.endpoint, from_date = since_timestamp, "Requesting homework statuses");

    let response = match client
        .get(&config.endpoint)
        .header(
            reqwest::header::AUTHORIZATION,
            format!("OAuth {}", config.credentials.practicum_token),
        )
        .query(&[("from_date", since_timestamp)])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            warn!(endpoint = %config.endpoint, "Endpoint request failed: {}", e);
            return Ok(ApiAnswer::Unavailable {
                reason: e.to_string(),
            });
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ProtocolError::EndpointUnreachable {
            status: status.as_u16(),
        }
        .into());
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            warn!(endpoint = %config.endpoint, "Failed to read response body: {}", e);
            return Ok(ApiAnswer::Unavailable {
                reason: e.to_string(),
            });
        }
    };

    let value = serde_json::from_slice(&body).map_err(|e| ProtocolError::InvalidJson {
        reason: e.to_string(),
    })?;
    Ok(ApiAnswer::Body(value))
}
