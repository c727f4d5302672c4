use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::chat::bridge::{DEFAULT_HISTORY_TURNS, DEFAULT_TEMPERATURE};
use crate::chat::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::typing::HISTORY_CAPACITY;

/// Consulted when the configured variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_history_turns")]
    pub history_turns: usize,
    #[serde(default = "default_typing_history_len")]
    pub typing_history_len: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_intro_enabled")]
    pub intro_enabled: bool,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}
fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_history_turns() -> usize {
    DEFAULT_HISTORY_TURNS
}
fn default_typing_history_len() -> usize {
    HISTORY_CAPACITY
}
fn default_theme() -> String {
    "default".to_string()
}
fn default_intro_enabled() -> bool {
    true
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
            history_turns: default_history_turns(),
            typing_history_len: default_typing_history_len(),
            theme: default_theme(),
            intro_enabled: default_intro_enabled(),
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mentorbridge")
            .join("config.toml")
    }

    /// Directory holding the store files and the log.
    pub fn app_data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("mentorbridge")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The API key from the configured variable, else `API_KEY`.
    pub fn api_key(&self) -> Option<String> {
        Self::api_key_from(&self.api_key_env, |name| env::var(name).ok())
    }

    fn api_key_from(primary: &str, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        [primary, FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(lookup)
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    /// Clamp values a hand-edited file may have pushed out of range.
    pub fn normalize(&mut self) {
        if !(0.0..=2.0).contains(&self.temperature) {
            self.temperature = default_temperature();
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = default_request_timeout_secs();
        }
        if self.history_turns == 0 {
            self.history_turns = default_history_turns();
        }
        if self.typing_history_len == 0 || self.typing_history_len > HISTORY_CAPACITY {
            self.typing_history_len = default_typing_history_len();
        }
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }
}
