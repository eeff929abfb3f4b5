// Tue Jan 13 2026 - Alex

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const REQUIRED_SECTION: &str = "required";
pub const REQUIRED_PARAMS: [&str; 2] = ["shodan_api_key", "mpv_file_path"];
pub const OPTIONAL_SECTION: &str = "optional";
pub const OPTIONAL_PARAMS: [&str; 1] = ["ipgeo_api_key"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub required: RequiredConfig,
    #[serde(default)]
    pub optional: OptionalConfig,
    #[serde(skip)]
    pub unknown: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequiredConfig {
    pub shodan_api_key: Option<String>,
    pub mpv_file_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionalConfig {
    pub ipgeo_api_key: Option<String>,
}

/// Settings a run cannot start without, plus the optional secondary geo key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub shodan_api_key: String,
    pub mpv_file_path: PathBuf,
    pub ipgeo_api_key: Option<String>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Required parameter is missing: {0}")]
    MissingParameter(String),
}

impl ConfigFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext.to_lowercase().as_str() {
            "toml" => Self::from_toml(&contents),
            "json" => Self::from_json(&contents),
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let value = serde_json::to_value(table).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self, ConfigError> {
        let unknown = unknown_entries(&value);
        let mut config: ConfigFile =
            serde_json::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.unknown = unknown;
        Ok(config)
    }

    /// Resolves the required settings. Blank values count as missing.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let shodan_api_key = non_blank(self.required.shodan_api_key.as_deref())
            .ok_or_else(|| ConfigError::MissingParameter(REQUIRED_PARAMS[0].to_string()))?;

        let mpv_file_path = self
            .required
            .mpv_file_path
            .as_ref()
            .filter(|path| !path.as_os_str().is_empty())
            .cloned()
            .ok_or_else(|| ConfigError::MissingParameter(REQUIRED_PARAMS[1].to_string()))?;

        Ok(Credentials {
            shodan_api_key: shodan_api_key.to_string(),
            mpv_file_path,
            ipgeo_api_key: non_blank(self.optional.ipgeo_api_key.as_deref()).map(str::to_string),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn unknown_entries(value: &Value) -> Vec<String> {
    let mut unknown = Vec::new();
    let Some(sections) = value.as_object() else {
        return unknown;
    };

    for (section, entries) in sections {
        let known: &[&str] = match section.as_str() {
            REQUIRED_SECTION => &REQUIRED_PARAMS,
            OPTIONAL_SECTION => &OPTIONAL_PARAMS,
            _ => {
                unknown.push(format!("Unknown section: {}", section));
                continue;
            }
        };

        if let Some(entries) = entries.as_object() {
            for key in entries.keys().filter(|key| !known.contains(&key.as_str())) {
                unknown.push(format!("Unknown parameter in {} section: {}", section, key));
            }
        }
    }

    unknown
}

pub fn load_credentials<P: AsRef<Path>>(path: P) -> Result<(Credentials, Vec<String>), ConfigError> {
    let config = ConfigFile::load(path)?;
    let credentials = config.credentials()?;
    Ok((credentials, config.unknown))
}
