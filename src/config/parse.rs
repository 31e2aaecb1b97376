use super::types::{Settings, DEFAULT_MAX_EVENTS_PER_BATCH};
use std::path::Path;
use thiserror::Error;

pub const ENV_BROKER_ENDPOINT: &str = "BROKER_ENDPOINT";
pub const ENV_BROKER_TOPIC: &str = "BROKER_TOPIC";
pub const ENV_MAX_EVENTS_PER_BATCH: &str = "MAX_EVENTS_PER_BATCH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("required setting '{0}' is missing")]
    Missing(&'static str),

    #[error("invalid value for '{name}': {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Load settings from a YAML file.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let yaml = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to open settings file '{}': {}", path.display(), e),
        ))
    })?;

    let settings: Settings = serde_yaml::from_str(&yaml)?;
    validate(&settings)?;
    Ok(settings)
}

/// Load settings from the process environment. Endpoint and topic are
/// required; missing either aborts startup.
pub fn settings_from_env() -> Result<Settings, ConfigError> {
    settings_from_lookup(|name| std::env::var(name).ok())
}

fn settings_from_lookup<F>(lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let broker_endpoint =
        lookup(ENV_BROKER_ENDPOINT).ok_or(ConfigError::Missing(ENV_BROKER_ENDPOINT))?;
    let topic = lookup(ENV_BROKER_TOPIC).ok_or(ConfigError::Missing(ENV_BROKER_TOPIC))?;

    let max_events_per_batch = match lookup(ENV_MAX_EVENTS_PER_BATCH) {
        Some(raw) => raw.parse::<usize>().map_err(|e| ConfigError::Invalid {
            name: ENV_MAX_EVENTS_PER_BATCH,
            reason: e.to_string(),
        })?,
        None => DEFAULT_MAX_EVENTS_PER_BATCH,
    };

    let settings = Settings {
        broker_endpoint,
        topic,
        max_events_per_batch,
    };
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.broker_endpoint.trim().is_empty() {
        return Err(ConfigError::Invalid {
            name: "broker_endpoint",
            reason: "must not be empty".to_string(),
        });
    }
    if settings.topic.trim().is_empty() {
        return Err(ConfigError::Invalid {
            name: "topic",
            reason: "must not be empty".to_string(),
        });
    }
    if settings.max_events_per_batch == 0 {
        return Err(ConfigError::Invalid {
            name: "max_events_per_batch",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
