//! Microsoft Teams incoming-webhook delivery.

pub mod config;
pub mod webhook;

pub use config::WebhookConfig;
pub use webhook::TeamsWebhook;
