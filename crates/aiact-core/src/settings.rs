use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::CoreError;

/// Overrides `ai.apiKey` from the settings file when set.
pub const API_KEY_ENV: &str = "AIACT_API_KEY";
/// Overrides `search.apiKey` from the settings file when set.
pub const SEARCH_API_KEY_ENV: &str = "AIACT_SEARCH_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSettings {
    pub provider: String,
    pub api_key: String,
    pub model: String,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchSettings {
    /// "duckduckgo", "serper", or empty to disable search entirely.
    pub provider: String,
    pub api_key: String,
    /// Hits kept per query.
    pub max_results: usize,
    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            provider: "duckduckgo".to_string(),
            api_key: String::new(),
            max_results: 3,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub ai: AiSettings,
    pub search: SearchSettings,
    /// Upper bound on a single model call.
    pub timeout_secs: u64,
    pub listen_addr: String,
    /// Keys taken from the environment, never written back to the file.
    #[serde(skip)]
    env_overrides: EnvOverrides,
}

/// Environment key that replaced a file value, plus the value it replaced.
#[derive(Debug, Clone, PartialEq)]
struct EnvOverride {
    env: String,
    file: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct EnvOverrides {
    ai: Option<EnvOverride>,
    search: Option<EnvOverride>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ai: AiSettings::default(),
            search: SearchSettings::default(),
            timeout_secs: 60,
            listen_addr: "127.0.0.1:8501".to_string(),
            env_overrides: EnvOverrides::default(),
        }
    }
}

impl Settings {
    /// Apply credential overrides from the environment.
    pub fn with_env_credentials(mut self) -> Self {
        self.apply_credentials(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(SEARCH_API_KEY_ENV).ok(),
        );
        self
    }

    fn apply_credentials(&mut self, api_key: Option<String>, search_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            let file = std::mem::replace(&mut self.ai.api_key, key.clone());
            self.env_overrides.ai = Some(EnvOverride { env: key, file });
        }
        if let Some(key) = search_key.filter(|k| !k.is_empty()) {
            let file = std::mem::replace(&mut self.search.api_key, key.clone());
            self.env_overrides.search = Some(EnvOverride { env: key, file });
        }
    }

    /// The settings as they should be stored: a key still equal to its
    /// environment value is swapped back for the file's own value.
    pub fn persisted(&self) -> Settings {
        let mut out = self.clone();
        if let Some(o) = &self.env_overrides.ai {
            if out.ai.api_key == o.env {
                out.ai.api_key = o.file.clone();
            }
        }
        if let Some(o) = &self.env_overrides.search {
            if out.search.api_key == o.env {
                out.search.api_key = o.file.clone();
            }
        }
        out.env_overrides = EnvOverrides::default();
        out
    }

    pub fn search_enabled(&self) -> bool {
        match self.search.provider.as_str() {
            "" => false,
            "serper" => !self.search.api_key.is_empty(),
            _ => true,
        }
    }
}

/// Resolve the settings directory (~/.aiact/).
pub fn settings_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".aiact")
}

pub fn settings_path() -> PathBuf {
    settings_dir().join("settings.json")
}

/// Read settings from `path`. A missing or unreadable file yields defaults.
pub fn read_settings(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

pub fn write_settings(path: &Path, settings: &Settings) -> Result<(), CoreError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(&settings.persisted())?;
    fs::write(path, json)?;
    Ok(())
}

pub fn ai_configured(settings: &AiSettings) -> bool {
    !settings.provider.is_empty()
        && !settings.model.is_empty()
        && (settings.provider == "ollama" || !settings.api_key.is_empty())
}
