use std::fs;
use std::path::{Path, PathBuf};

use dirs_next as dirs;
use serde::Deserialize;

use crate::error::AppError;

pub const URL_ENV: &str = "BLACKDUCK_URL";
pub const TOKEN_ENV: &str = "BLACKDUCK_API_TOKEN";
pub const SCRIPT_URL_ENV: &str = "DETECT_SCRIPT_URL";
pub const DEFAULT_SCRIPT_URL: &str = "https://detect.synopsys.com/detect8.sh";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub url: Option<String>,
    pub api_token: Option<String>,
    pub script_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

/// Connection settings handed to the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub token: String,
    pub script_url: String,
}

impl Credentials {
    /// Environment values take precedence over the configuration file.
    pub fn resolve<F>(config: &Config, env: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, fallback: &Option<String>| {
            env(key).filter(|v| !v.trim().is_empty()).or_else(|| fallback.clone())
        };

        let url = pick(URL_ENV, &config.url).ok_or(AppError::MissingCredential("hub URL"))?;
        let token =
            pick(TOKEN_ENV, &config.api_token).ok_or(AppError::MissingCredential("API token"))?;
        let script_url = pick(SCRIPT_URL_ENV, &config.script_url)
            .unwrap_or_else(|| DEFAULT_SCRIPT_URL.to_string());

        Ok(Credentials { url, token, script_url })
    }

    pub fn from_process_env(config: &Config) -> Result<Self, AppError> {
        Self::resolve(config, |key| std::env::var(key).ok())
    }
}

pub fn config_file_path() -> Result<PathBuf, AppError> {
    let config_root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .ok_or_else(|| {
            AppError::config("Unable to determine configuration directory for this platform")
        })?;
    Ok(config_root.join("hubscan").join("config.toml"))
}
