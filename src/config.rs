use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub locations: Vec<String>,
    pub chart_style_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            locations: ["Ottawa", "Gatineau", "Cornwall", "All Locations"]
                .into_iter()
                .map(String::from)
                .collect(),
            chart_style_path: Some("chart.json".to_string()),
        }
    }
}

impl AppConfig {
    pub fn backend_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.backend_url)
            .map_err(|e| ConfigError::BackendUrl(self.backend_url.clone(), e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::BackendUrl(
                self.backend_url.clone(),
                "not a base URL".to_string(),
            ));
        }
        Ok(url)
    }

    /// Case-insensitive lookup of a configured location, returning its canonical spelling.
    pub fn find_location(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.locations
            .iter()
            .find(|l| l.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid backend_url '{0}': {1}")]
    BackendUrl(String, String),
}

/// Loads the config file; a missing file yields the defaults.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    if !Path::new(path).exists() {
        tracing::warn!("Config {} not found, using defaults", path);
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

fn parse_config(content: &str) -> Result<AppConfig, serde_json::Error> {
    serde_json::from_str(content)
}
