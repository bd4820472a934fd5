//! Envelope expected by Teams incoming webhooks.

use serde::{Deserialize, Serialize};

use crate::adaptivecards::{AdaptiveCard, CardError, Flow, NodePath, Validate, Validator};

pub const MESSAGE_TYPE: &str = "message";
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: String,
    /// Written as `""` when the card is carried inline.
    #[serde(default)]
    pub content_url: String,
    pub content: AdaptiveCard,
}

impl Attachment {
    pub fn adaptive(card: AdaptiveCard) -> Self {
        Self {
            content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
            content_url: String::new(),
            content: card,
        }
    }
}

impl Message {
    /// A message carrying a single inline card.
    pub fn adaptive(card: AdaptiveCard) -> Self {
        Self {
            kind: MESSAGE_TYPE.to_string(),
            attachments: vec![Attachment::adaptive(card)],
        }
    }

    pub fn cards(&self) -> impl Iterator<Item = &AdaptiveCard> {
        self.attachments.iter().map(|attachment| &attachment.content)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, CardError> {
        serde_json::to_value(self).map_err(|err| CardError::MalformedWire {
            path: NodePath::root(),
            message: format!("encode failed: {err}"),
        })
    }
}

/// Validates every attached card as a top-level card.
impl Validate for Message {
    fn validate_at(&self, path: &NodePath, v: &mut Validator) -> Flow {
        let attachments = path.field("attachments");
        for (index, attachment) in self.attachments.iter().enumerate() {
            v.child(&attachments.index(index), "content", &attachment.content)?;
        }
        Ok(())
    }
}
