use crate::error::{NexusError, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_INSIGHT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_INSIGHT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_INSIGHT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_INSIGHT_KEY_ENV: &str = "API_KEY";

pub const CONFIG_KEYS: [&str; 4] = [
    "insight-endpoint",
    "insight-model",
    "insight-timeout",
    "insight-key-env",
];

/// Configuration for nexus, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NexusConfig {
    /// Base URL of the text-generation API
    #[serde(default = "default_insight_endpoint")]
    pub insight_endpoint: String,

    #[serde(default = "default_insight_model")]
    pub insight_model: String,

    /// Request timeout for insight calls, in seconds
    #[serde(default = "default_insight_timeout")]
    pub insight_timeout_secs: u64,

    /// Name of the environment variable holding the API key. The key itself
    /// is never written to disk.
    #[serde(default = "default_insight_key_env")]
    pub insight_key_env: String,
}

fn default_insight_endpoint() -> String {
    DEFAULT_INSIGHT_ENDPOINT.to_string()
}

fn default_insight_model() -> String {
    DEFAULT_INSIGHT_MODEL.to_string()
}

fn default_insight_timeout() -> u64 {
    DEFAULT_INSIGHT_TIMEOUT_SECS
}

fn default_insight_key_env() -> String {
    DEFAULT_INSIGHT_KEY_ENV.to_string()
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            insight_endpoint: default_insight_endpoint(),
            insight_model: default_insight_model(),
            insight_timeout_secs: default_insight_timeout(),
            insight_key_env: default_insight_key_env(),
        }
    }
}

impl NexusConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NexusError::Io)?;
        let config: NexusConfig =
            serde_json::from_str(&content).map_err(NexusError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NexusError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NexusError::Serialization)?;
        fs::write(config_path, content).map_err(NexusError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "insight-endpoint" => Some(self.insight_endpoint.clone()),
            "insight-model" => Some(self.insight_model.clone()),
            "insight-timeout" => Some(self.insight_timeout_secs.to_string()),
            "insight-key-env" => Some(self.insight_key_env.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("{} cannot be empty", key));
        }
        match key {
            "insight-endpoint" => self.insight_endpoint = parse_endpoint(value)?,
            "insight-model" => self.insight_model = value.to_string(),
            "insight-timeout" => {
                self.insight_timeout_secs = match value.parse::<u64>() {
                    Ok(secs) if secs > 0 => secs,
                    _ => return Err(format!("Invalid timeout: {}", value)),
                }
            }
            "insight-key-env" => self.insight_key_env = value.to_string(),
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}

/// Accepts absolute http(s) URLs only, without a trailing slash.
fn parse_endpoint(value: &str) -> std::result::Result<String, String> {
    let url = Url::parse(value).map_err(|e| format!("Invalid endpoint {}: {}", value, e))?;
    match url.scheme() {
        "http" | "https" => Ok(value.trim_end_matches('/').to_string()),
        other => Err(format!("Unsupported endpoint scheme: {}", other)),
    }
}
