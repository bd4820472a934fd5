//! Adaptive Card core: a typed card model with a canonical JSON codec and validation, the
//! message envelope expected by Teams incoming webhooks, and an egress sender that posts it.
//!
//! The card model (`adaptivecards`) is pure: building, validating, encoding and decoding a card
//! never performs I/O or logging. Delivery lives in `egress` and `platforms`.
pub mod adaptivecards;
pub mod egress;
pub mod message;
pub mod platforms;
pub mod prelude;

pub use adaptivecards::{
    AdaptiveCard, CardError, Element, NodePath, Validate, ValidationErrors, ValidationMode,
    ValidationOptions, decode, decode_str, encode, validate,
};
pub use egress::{EgressError, EgressSender, SendResult, send_card};
pub use message::{ADAPTIVE_CARD_CONTENT_TYPE, Attachment, Message};
pub use platforms::teams::{TeamsWebhook, WebhookConfig};

/// Returns the semantic version advertised by this crate.
///
/// ```
/// assert_eq!(acard_core::version(), "0.1.0");
/// ```
pub fn version() -> &'static str {
    "0.1.0"
}
