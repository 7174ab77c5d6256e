use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1800;
pub const TICK_MS_ENV: &str = "PULSE_TICK_MS";
pub const SEED_ENV: &str = "PULSE_SEED";
pub const LOG_STDOUT_ENV: &str = "PULSE_LOG_STDOUT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid tick interval: {0}")]
    TickInterval(String),
    #[error("invalid seed: {0}")]
    Seed(String),
    #[error("invalid flag {key}: {value}")]
    Flag { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub tick_interval: Duration,
    pub seed: Option<u64>,
    pub log_stdout: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            seed: None,
            log_stdout: false,
        }
    }
}

impl DashboardConfig {
    /// Resolves settings with explicit overrides first, then `lookup`
    /// (normally the process environment), then defaults.
    pub fn resolve(
        tick_ms: Option<u64>,
        seed: Option<u64>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let tick_ms = match tick_ms {
            Some(value) => value,
            None => match non_empty(lookup(TICK_MS_ENV)) {
                Some(raw) => raw
                    .parse::<u64>()
                    .map_err(|_| ConfigError::TickInterval(raw.clone()))?,
                None => DEFAULT_TICK_INTERVAL_MS,
            },
        };
        if tick_ms == 0 {
            return Err(ConfigError::TickInterval("0".to_string()));
        }

        let seed = match seed {
            Some(value) => Some(value),
            None => match non_empty(lookup(SEED_ENV)) {
                Some(raw) => Some(raw.parse::<u64>().map_err(|_| ConfigError::Seed(raw.clone()))?),
                None => None,
            },
        };

        let log_stdout = match non_empty(lookup(LOG_STDOUT_ENV)) {
            Some(raw) => parse_bool_flag(&raw).ok_or_else(|| ConfigError::Flag {
                key: LOG_STDOUT_ENV.to_string(),
                value: raw.clone(),
            })?,
            None => false,
        };

        Ok(Self {
            tick_interval: Duration::from_millis(tick_ms),
            seed,
            log_stdout,
        })
    }

    pub fn from_env(tick_ms: Option<u64>, seed: Option<u64>) -> Result<Self, ConfigError> {
        Self::resolve(tick_ms, seed, |key| std::env::var(key).ok())
    }
}

pub fn parse_bool_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_env() {
        let config = DashboardConfig::resolve(None, None, lookup_from(&[])).expect("config");
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.tick_interval, Duration::from_millis(1800));
    }

    #[test]
    fn env_values_are_read() {
        let config = DashboardConfig::resolve(
            None,
            None,
            lookup_from(&[(TICK_MS_ENV, "250"), (SEED_ENV, " 42 "), (LOG_STDOUT_ENV, "yes")]),
        )
        .expect("config");
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.seed, Some(42));
        assert!(config.log_stdout);
    }

    #[test]
    fn explicit_overrides_win_over_env() {
        let config = DashboardConfig::resolve(
            Some(900),
            Some(7),
            lookup_from(&[(TICK_MS_ENV, "250"), (SEED_ENV, "42")]),
        )
        .expect("config");
        assert_eq!(config.tick_interval, Duration::from_millis(900));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            DashboardConfig::resolve(Some(0), None, lookup_from(&[])),
            Err(ConfigError::TickInterval("0".to_string()))
        );
        assert_eq!(
            DashboardConfig::resolve(None, None, lookup_from(&[(TICK_MS_ENV, "fast")])),
            Err(ConfigError::TickInterval("fast".to_string()))
        );
        assert_eq!(
            DashboardConfig::resolve(None, None, lookup_from(&[(SEED_ENV, "-1")])),
            Err(ConfigError::Seed("-1".to_string()))
        );
        let err = DashboardConfig::resolve(None, None, lookup_from(&[(LOG_STDOUT_ENV, "maybe")]))
            .expect_err("bad flag");
        assert_eq!(err.to_string(), "invalid flag PULSE_LOG_STDOUT: maybe");
    }

    #[test]
    fn parse_bool_flag_accepts_common_values() {
        assert_eq!(parse_bool_flag("1"), Some(true));
        assert_eq!(parse_bool_flag("ON"), Some(true));
        assert_eq!(parse_bool_flag("0"), Some(false));
        assert_eq!(parse_bool_flag("off"), Some(false));
        assert_eq!(parse_bool_flag("maybe"), None);
    }
}
