use crate::command::KeywordTable;
use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub plug: PlugConfig,

    #[serde(default)]
    pub commands: CommandsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AudioConfig {
    #[serde(default = "default_device_name")]
    pub device_name: String,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_channels")]
    pub channels: u16,

    /// Frames per capture block (8000 frames at 16 kHz is half a second).
    #[serde(default = "default_block_size")]
    pub block_size: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            block_size: default_block_size(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_engine")]
    pub engine: String,

    #[serde(default)]
    pub vosk: VoskConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            vosk: VoskConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoskConfig {
    #[serde(default = "default_model_path")]
    pub model_path: String,
}

impl Default for VoskConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlugConfig {
    #[serde(default = "default_plug_host")]
    pub host: String,

    #[serde(default = "default_plug_port")]
    pub port: u16,

    /// Logical name used in log lines.
    #[serde(default = "default_plug_name")]
    pub name: String,
}

impl Default for PlugConfig {
    fn default() -> Self {
        Self {
            host: default_plug_host(),
            port: default_plug_port(),
            name: default_plug_name(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommandsConfig {
    #[serde(default = "default_on_keywords")]
    pub on: Vec<String>,

    #[serde(default = "default_off_keywords")]
    pub off: Vec<String>,

    #[serde(default = "default_toggle_keywords")]
    pub toggle: Vec<String>,
}

impl CommandsConfig {
    pub fn table(&self) -> KeywordTable {
        KeywordTable::new(self.on.clone(), self.off.clone(), self.toggle.clone())
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            on: default_on_keywords(),
            off: default_off_keywords(),
            toggle: default_toggle_keywords(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_device_name() -> String {
    "default".to_string()
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_channels() -> u16 {
    1
}

fn default_block_size() -> u32 {
    8000
}

fn default_engine() -> String {
    "vosk".to_string()
}

fn default_model_path() -> String {
    "model/vosk-model-small-en-us-0.15".to_string()
}

fn default_plug_host() -> String {
    "192.168.0.1".to_string()
}

fn default_plug_port() -> u16 {
    9999
}

fn default_plug_name() -> String {
    "livingroom".to_string()
}

fn default_on_keywords() -> Vec<String> {
    vec!["turn on".into(), "switch on".into(), "on".into()]
}

fn default_off_keywords() -> Vec<String> {
    vec!["turn off".into(), "switch off".into(), "off".into()]
}

fn default_toggle_keywords() -> Vec<String> {
    vec!["toggle".into(), "switch".into()]
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = errors.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let interpolated = interpolate_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }
}
