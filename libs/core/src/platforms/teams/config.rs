use std::env;
use std::time::Duration;

use url::Url;

use crate::adaptivecards::check_absolute_url;
use crate::egress::EgressError;

pub const WEBHOOK_ENV: &str = "TEAMS_WEBHOOK";
pub const WEBHOOK_TIMEOUT_ENV: &str = "TEAMS_WEBHOOK_TIMEOUT_SECS";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Destination of an incoming-webhook post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub url: Url,
    pub timeout: Duration,
}

impl WebhookConfig {
    /// Accepts only absolute URLs with a scheme and a host (`mock://` included).
    pub fn new(url: &str) -> Result<Self, EgressError> {
        let url = check_absolute_url(url.trim()).map_err(EgressError::Config)?;
        Ok(Self {
            url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, EgressError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`WebhookConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EgressError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(WEBHOOK_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| EgressError::Config(format!("{WEBHOOK_ENV} is not set")))?;
        let timeout = match lookup(WEBHOOK_TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|err| {
                    EgressError::Config(format!("{WEBHOOK_TIMEOUT_ENV}='{raw}' is invalid: {err}"))
                })?,
            None => DEFAULT_TIMEOUT,
        };
        Ok(Self::new(&url)?.with_timeout(timeout))
    }

    pub fn is_mock(&self) -> bool {
        self.url.scheme() == "mock"
    }

    /// Host of the webhook. The full URL embeds a token and is never logged.
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_url_and_default_timeout() {
        let cfg = WebhookConfig::from_lookup(lookup(&[(
            WEBHOOK_ENV,
            "https://example.webhook.office.com/webhookb2/abc",
        )]))
        .unwrap();
        assert_eq!(cfg.host(), "example.webhook.office.com");
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
        assert!(!cfg.is_mock());
    }

    #[test]
    fn timeout_override() {
        let cfg = WebhookConfig::from_lookup(lookup(&[
            (WEBHOOK_ENV, "mock://teams"),
            (WEBHOOK_TIMEOUT_ENV, "3"),
        ]))
        .unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert!(cfg.is_mock());
    }

    #[test]
    fn rejects_missing_or_relative_urls() {
        assert!(matches!(
            WebhookConfig::from_lookup(lookup(&[])),
            Err(EgressError::Config(_))
        ));
        assert!(WebhookConfig::new("/webhookb2/abc").is_err());
        assert!(WebhookConfig::new("not a url").is_err());
        assert!(
            WebhookConfig::from_lookup(lookup(&[
                (WEBHOOK_ENV, "https://example.com"),
                (WEBHOOK_TIMEOUT_ENV, "soon"),
            ]))
            .is_err()
        );
    }
}
