use std::time::Instant;

use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::config::WebhookConfig;
use crate::egress::{EgressError, EgressSender, SendResult};
use crate::message::Message;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
const MAX_ERROR_BODY: usize = 512;

/// Posts card messages to a Teams incoming webhook. No retries: a failed post is reported as is.
#[derive(Debug, Clone)]
pub struct TeamsWebhook {
    http: Client,
    config: WebhookConfig,
}

impl TeamsWebhook {
    pub fn new(config: WebhookConfig) -> Result<Self, EgressError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| EgressError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self { http, config })
    }

    /// Uses a caller-provided client; the configured timeout is still applied per request.
    pub fn with_client(http: Client, config: WebhookConfig) -> Self {
        Self { http, config }
    }

    pub fn from_env() -> Result<Self, EgressError> {
        Self::new(WebhookConfig::from_env()?)
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    fn record(outcome: &'static str) {
        counter!("acard_webhook_requests_total", "outcome" => outcome).increment(1);
    }
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}

#[async_trait]
impl EgressSender for TeamsWebhook {
    async fn send(&self, msg: &Message) -> Result<SendResult, EgressError> {
        let payload = serde_json::to_vec(msg).map_err(|err| {
            Self::record("encode");
            EgressError::Encode(err)
        })?;
        let host = self.config.host();
        debug!(host, bytes = payload.len(), "encoded webhook payload");

        if self.config.is_mock() {
            Self::record("mock");
            let echoed: Value = serde_json::from_slice(&payload).map_err(EgressError::Encode)?;
            info!(host, "mock webhook: payload not sent");
            return Ok(SendResult {
                status: 200,
                body: None,
                raw: Some(json!({ "mock": true, "payload": echoed })),
            });
        }

        let started = Instant::now();
        let response = self
            .http
            .post(self.config.url.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .timeout(self.config.timeout)
            .body(payload)
            .send()
            .await
            .map_err(|err| {
                Self::record("transport");
                warn!(host, error = %err, "webhook post failed");
                EgressError::Transport(err)
            })?;

        let status = response.status();
        histogram!(
            "acard_webhook_roundtrip_seconds",
            "status" => status.as_str().to_string()
        )
        .record(started.elapsed().as_secs_f64());

        let body = response.text().await.map_err(|err| {
            Self::record("transport");
            EgressError::Transport(err)
        })?;

        if !status.is_success() {
            Self::record("remote");
            warn!(host, status = status.as_u16(), "webhook rejected the message");
            return Err(EgressError::Remote {
                status,
                body: truncate(body),
            });
        }

        Self::record("ok");
        info!(host, status = status.as_u16(), "card delivered");
        let raw = serde_json::from_str::<Value>(&body).ok();
        Ok(SendResult {
            status: status.as_u16(),
            body: (!body.is_empty()).then_some(body),
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptivecards::{AdaptiveCard, TextBlock};

    #[test]
    fn long_error_bodies_are_truncated_on_a_char_boundary() {
        let body = "é".repeat(400);
        let cut = truncate(body);
        assert!(cut.len() <= MAX_ERROR_BODY);
        assert!(cut.chars().all(|c| c == 'é'));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn mock_urls_echo_without_network() {
        let sender = TeamsWebhook::new(WebhookConfig::new("mock://teams").unwrap()).unwrap();
        let card = AdaptiveCard::new().with_element(TextBlock::new("TextBlock 1"));
        let result = sender.send(&Message::adaptive(card)).await.unwrap();
        assert_eq!(result.status, 200);
        let raw = result.raw.unwrap();
        assert_eq!(raw["payload"]["type"], "message");
        assert_eq!(
            raw["payload"]["attachments"][0]["content"]["body"][0]["text"],
            "TextBlock 1"
        );
        assert!(logs_contain("mock webhook"));
    }
}
