//! Sends an Adaptive Card to a Teams incoming webhook.
//!
//! Without `--card` the card is one `TextBlock` per `--text` (a single "TextBlock 1" when none
//! is given). The webhook comes from `--webhook` or `TEAMS_WEBHOOK`; a `mock://` URL echoes the
//! payload instead of posting it.

use std::fs;
use std::path::PathBuf;

use acard_core::adaptivecards::{TextBlock, encode_pretty, encode_string};
use acard_core::{
    AdaptiveCard, EgressSender, Message, TeamsWebhook, Validate, ValidationOptions, WebhookConfig,
    decode_str,
};
use anyhow::{Context, Result, bail};
use clap::Parser;

const DEFAULT_TEXT: &str = "TextBlock 1";

#[derive(Parser, Debug)]
#[command(author, version, about = "Validate and post an Adaptive Card to a Teams webhook")]
struct Cli {
    /// Add a TextBlock with this text (repeatable)
    #[arg(long = "text", value_name = "TEXT", conflicts_with = "card")]
    texts: Vec<String>,
    /// Read the card from a JSON file
    #[arg(long, value_name = "FILE")]
    card: Option<PathBuf>,
    /// Webhook URL; overrides TEAMS_WEBHOOK
    #[arg(long, value_name = "URL")]
    webhook: Option<String>,
    /// Validate and print the card without posting it
    #[arg(long)]
    dry_run: bool,
    /// Pretty-print the encoded card
    #[arg(long)]
    pretty: bool,
    /// Report every validation error instead of the first one
    #[arg(long)]
    all_errors: bool,
    /// Reject unknown enumeration values and malformed date/time hints
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn validation_options(&self) -> ValidationOptions {
        let options = if self.all_errors {
            ValidationOptions::collect()
        } else {
            ValidationOptions::default()
        };
        if self.strict { options.strict() } else { options }
    }

    fn build_card(&self) -> Result<AdaptiveCard> {
        if let Some(path) = &self.card {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            return decode_str(&raw).with_context(|| format!("failed to decode {}", path.display()));
        }

        let mut card = AdaptiveCard::new();
        if self.texts.is_empty() {
            card.push_element(TextBlock::new(DEFAULT_TEXT));
        }
        for text in &self.texts {
            card.push_element(TextBlock::new(text.as_str()));
        }
        Ok(card)
    }

    fn webhook_config(&self) -> Result<WebhookConfig> {
        let config = match &self.webhook {
            Some(url) => WebhookConfig::new(url)?,
            None => WebhookConfig::from_env()?,
        };
        Ok(config)
    }
}

fn render(card: &AdaptiveCard, pretty: bool) -> Result<String> {
    let json = if pretty {
        encode_pretty(card)?
    } else {
        encode_string(card)?
    };
    Ok(json)
}

async fn run(cli: Cli) -> Result<()> {
    let card = cli.build_card()?;
    if let Err(errors) = card.validate_with(cli.validation_options()) {
        for error in errors.errors() {
            tracing::error!(code = error.code(), path = %error.path(), "{error}");
        }
        bail!("card failed validation: {errors}");
    }

    println!("{}", render(&card, cli.pretty)?);
    if cli.dry_run {
        tracing::info!("dry run: card not sent");
        return Ok(());
    }

    let webhook = TeamsWebhook::new(cli.webhook_config()?)?;
    let result = webhook
        .send(&Message::adaptive(card))
        .await
        .with_context(|| format!("failed to post card to {}", webhook.config().host()))?;
    tracing::debug!(status = result.status, "webhook accepted the message");
    if let Some(body) = result.body.filter(|body| !body.is_empty()) {
        println!("{body}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    acard_telemetry::install("acard-send")?;
    run(Cli::parse()).await
}
