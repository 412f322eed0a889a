use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

use crate::school::{load_profile, Profile};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_THINKING_BUDGET: u32 = 16000;
const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Knobs read from the optional YAML settings file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: String,
    /// reasoning allowance passed to the model, in tokens
    pub thinking_budget: u32,
    pub timeout_seconds: u64,
    pub base_url: String,
    pub profile: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub preferences_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            thinking_budget: DEFAULT_THINKING_BUDGET,
            timeout_seconds: 120,
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: None,
            output_dir: PathBuf::from("output"),
            preferences_path: PathBuf::from("preferences.json"),
        }
    }
}

pub struct Config {
    /// generation credential, `None` when unset or blank
    pub api_key: Option<String>,
    pub settings: Settings,
    pub profile: Profile,
}

impl Config {
    /// Loads `.env`, the credential, the settings file and the school profile.
    pub fn load(settings_path: Option<&Path>) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let settings = match settings_path {
            Some(path) => read_settings(path)?,
            None => Settings::default(),
        };

        let profile = match settings.profile.as_deref() {
            Some(path) => load_profile(path)?,
            None => Profile::default(),
        };

        Ok(Self {
            api_key: api_key_from_env(),
            settings,
            profile,
        })
    }
}

fn read_settings(path: &Path) -> anyhow::Result<Settings> {
    let content = fs::read_to_string(path)
        .context(format!("failed to read settings {}", path.display()))?;
    serde_yaml_ng::from_str(&content).context(format!("settings {} are not valid", path.display()))
}

fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}
