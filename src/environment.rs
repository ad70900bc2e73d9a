// src/environment.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub address: String,
    pub port: u16,
    pub pages_path: PathBuf,
    pub static_path: PathBuf,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 5000,
            pages_path: PathBuf::from("templates"),
            static_path: PathBuf::from("static"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration based on environment.
    ///
    /// `config.yaml` in the working directory is optional; an explicitly
    /// requested file must exist.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut config = match config_path {
            Some(path) => Self::load_from_file(path, &environment)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from_file(&default_path, &environment)?
                } else {
                    info!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        if let Ok(port) = std::env::var("ROCKET_PORT") {
            config.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;
        }

        config.pages_path = Self::resolve_path(&config.pages_path)?;
        config.static_path = Self::resolve_path(&config.static_path)?;
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("FUTUREME_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }
}

/// Load a dotenv file into the process environment.
///
/// Variables already set in the environment win. Returns `false` when the
/// file does not exist.
pub fn load_dotenv(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to load {}", path.display())),
    }
}
