// src/core/config_manager.rs
//! Client configuration: environment selection, optional config.yaml, env overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub store_path: PathBuf,
    pub timeout_seconds: u64,
    pub log_format: LogFormat,
    pub log_file: Option<PathBuf>,
}

/// One environment section of config.yaml; every key is optional
#[derive(Debug, Default, Deserialize)]
struct ClientSection {
    api_base_url: Option<String>,
    store_path: Option<PathBuf>,
    timeout_seconds: Option<u64>,
    log_format: Option<LogFormat>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: ClientSection,
    #[serde(default)]
    production: ClientSection,
}

impl ConfigManager {
    /// Load from the process environment and ./config.yaml if present
    pub fn load() -> Result<Self> {
        let environment = std::env::var("JOB_BOARD_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string());
        info!("Loading client configuration for: {}", environment);

        let base_dir = std::env::current_dir().context("Failed to get current directory")?;
        let config_path = base_dir.join(CONFIG_FILE);
        let file_contents = if config_path.exists() {
            Some(
                std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?,
            )
        } else {
            None
        };

        Self::resolve(
            &environment,
            &base_dir,
            file_contents.as_deref(),
            |key| std::env::var(key).ok(),
        )
    }

    /// Merge defaults, the file section for `environment`, then env overrides
    pub fn resolve(
        environment: &str,
        base_dir: &Path,
        file_contents: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let file: ConfigFile = match file_contents {
            Some(contents) => {
                serde_yaml::from_str(contents).context("Failed to parse config.yaml")?
            }
            None => ConfigFile::default(),
        };

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        let default_store = if environment == "production" {
            PathBuf::from("/app/data/job-board.db")
        } else {
            base_dir.join(".job-board").join("store.db")
        };

        let api_base_url = lookup("JOB_BOARD_API_URL")
            .or(section.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let store_path = lookup("JOB_BOARD_STORE_PATH")
            .map(PathBuf::from)
            .or(section.store_path)
            .unwrap_or(default_store);

        let timeout_seconds = match lookup("JOB_BOARD_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                anyhow::anyhow!("JOB_BOARD_TIMEOUT_SECS must be a number of seconds")
            })?,
            None => section.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let client = ClientConfig {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            store_path: resolve_path(base_dir, store_path),
            timeout_seconds,
            log_format: section.log_format.unwrap_or_default(),
            log_file: section.log_file.map(|p| resolve_path(base_dir, p)),
        };

        Ok(Self {
            environment: environment.to_string(),
            client,
        })
    }

    /// Ensure the store's parent directory exists
    pub async fn ensure_directories(&self) -> Result<()> {
        if let Some(parent) = self.client.store_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(())
    }
}

fn resolve_path(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file() {
        let config = ConfigManager::resolve("local", Path::new("/work"), None, no_env).unwrap();
        assert_eq!(config.client.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.client.store_path, PathBuf::from("/work/.job-board/store.db"));
        assert_eq!(config.client.timeout_seconds, 30);
        assert_eq!(config.client.log_format, LogFormat::Plain);
    }

    #[test]
    fn test_file_section_follows_environment() {
        let yaml = r#"
local:
  api_base_url: http://localhost:8080/
production:
  api_base_url: https://jobs.example.edu/api
  store_path: /var/lib/job-board/store.db
  log_format: json
"#;
        let config =
            ConfigManager::resolve("production", Path::new("/work"), Some(yaml), no_env).unwrap();
        assert_eq!(config.client.api_base_url, "https://jobs.example.edu/api");
        assert_eq!(config.client.store_path, PathBuf::from("/var/lib/job-board/store.db"));
        assert_eq!(config.client.log_format, LogFormat::Json);

        let local =
            ConfigManager::resolve("local", Path::new("/work"), Some(yaml), no_env).unwrap();
        assert_eq!(local.client.api_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_env_overrides_win() {
        let lookup = |key: &str| match key {
            "JOB_BOARD_API_URL" => Some("http://10.0.0.5:9000".to_string()),
            "JOB_BOARD_TIMEOUT_SECS" => Some("5".to_string()),
            "JOB_BOARD_STORE_PATH" => Some("state/kv.db".to_string()),
            _ => None,
        };
        let config = ConfigManager::resolve("local", Path::new("/work"), None, lookup).unwrap();
        assert_eq!(config.client.api_base_url, "http://10.0.0.5:9000");
        assert_eq!(config.client.timeout_seconds, 5);
        assert_eq!(config.client.store_path, PathBuf::from("/work/state/kv.db"));
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let lookup = |key: &str| (key == "JOB_BOARD_TIMEOUT_SECS").then(|| "soon".to_string());
        assert!(ConfigManager::resolve("local", Path::new("/work"), None, lookup).is_err());
    }
}
