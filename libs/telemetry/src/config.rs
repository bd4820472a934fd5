use std::env;

pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const LOG_FILTER_ENV: &str = "RUST_LOG";
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub format: LogFormat,
    /// `EnvFilter` directives, e.g. `info,acard_core=debug`.
    pub filter: String,
}

impl TelemetryConfig {
    pub fn from_env(service_name: &str) -> Self {
        Self::from_lookup(service_name, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(service_name: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = lookup(LOG_FORMAT_ENV)
            .map(|v| match v.to_lowercase().as_str() {
                "text" | "pretty" | "plain" => LogFormat::Text,
                _ => LogFormat::Json,
            })
            .unwrap_or(LogFormat::Json);
        let filter = lookup(LOG_FILTER_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        Self {
            service_name: service_name.to_string(),
            format,
            filter,
        }
    }

    pub fn json_logs(&self) -> bool {
        self.format == LogFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_json_at_info() {
        let cfg = TelemetryConfig::from_lookup("acard-send", |_| None);
        assert_eq!(cfg.format, LogFormat::Json);
        assert_eq!(cfg.filter, "info");
        assert_eq!(cfg.service_name, "acard-send");
    }

    #[test]
    fn human_formats_switch_to_text() {
        for value in ["text", "Pretty", "PLAIN"] {
            let cfg = TelemetryConfig::from_lookup("svc", |key| {
                (key == LOG_FORMAT_ENV).then(|| value.to_string())
            });
            assert!(!cfg.json_logs(), "{value}");
        }
    }

    #[test]
    fn rust_log_overrides_the_filter() {
        let cfg = TelemetryConfig::from_lookup("svc", |key| {
            (key == LOG_FILTER_ENV).then(|| "acard_core=debug".to_string())
        });
        assert_eq!(cfg.filter, "acard_core=debug");
    }
}
