//! Outbound delivery of card messages.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::adaptivecards::{AdaptiveCard, CardError, Validate};
use crate::message::Message;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SendResult {
    pub status: u16,
    /// Raw response body, when the receiver returned one.
    pub body: Option<String>,
    /// Response body parsed as JSON, when it was JSON.
    pub raw: Option<Value>,
}

#[derive(Debug, Error)]
pub enum EgressError {
    #[error("webhook configuration error: {0}")]
    Config(String),
    #[error("card rejected before sending: {0}")]
    InvalidCard(#[from] CardError),
    #[error("failed to encode message")]
    Encode(#[source] serde_json::Error),
    #[error("webhook transport error")]
    Transport(#[source] reqwest::Error),
    #[error("webhook remote error (status {status}): {body}")]
    Remote { status: StatusCode, body: String },
}

impl EgressError {
    /// Short label used for the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::InvalidCard(_) => "invalid_card",
            Self::Encode(_) => "encode",
            Self::Transport(_) => "transport",
            Self::Remote { .. } => "remote",
        }
    }
}

#[async_trait]
pub trait EgressSender: Send + Sync {
    async fn send(&self, msg: &Message) -> Result<SendResult, EgressError>;
}

/// Validates `card` (first error wins), wraps it in a message envelope and sends it.
pub async fn send_card<S>(sender: &S, card: AdaptiveCard) -> Result<SendResult, EgressError>
where
    S: EgressSender + ?Sized,
{
    card.validate()?;
    sender.send(&Message::adaptive(card)).await
}
