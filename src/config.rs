use serde::{Deserialize, Serialize};
use anyhow::{Context, Result};
use reqwest::Url;
use crate::prober::ProbeMethod;
use std::path::Path;
use tokio::fs;

/// Root API path probed when an authenticated project omits its endpoint.
pub const DEFAULT_AUTH_ENDPOINT: &str = "/rest/v1/";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProjectConfig {
    pub name: String,
    pub url: String,
    pub endpoint: Option<String>,
    pub apikey: Option<String>,
    #[serde(default)]
    pub auth: bool,
    pub method: Option<ProbeMethod>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct KeepaliveConfig {
    pub projects: Vec<ProjectConfig>,
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl KeepaliveConfig {
    /// Get the log level as a tracing::Level
    pub fn get_tracing_level(&self) -> Result<tracing::Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(tracing::Level::TRACE),
            "debug" => Ok(tracing::Level::DEBUG),
            "info" => Ok(tracing::Level::INFO),
            "warn" | "warning" => Ok(tracing::Level::WARN),
            "error" => Ok(tracing::Level::ERROR),
            _ => Err(anyhow::anyhow!("Invalid log level: {}. Valid levels are: trace, debug, info, warn, error", self.log_level))
        }
    }

    fn validate(&self) -> Result<()> {
        for project in &self.projects {
            if project.name.trim().is_empty() {
                return Err(anyhow::anyhow!("Project with url {} has an empty name", project.url));
            }
        }
        Ok(())
    }
}

/// Load the run configuration from whichever source this deployment uses.
///
/// `PROJECTS_FROM_ENV=true` reads the document from the KEEPALIVE_PROJECTS
/// environment variable; otherwise it comes from the file named by
/// KEEPALIVE_CONFIG (default keepalive.json). The source is a deployment
/// choice, never a fallback chain.
pub async fn load() -> Result<KeepaliveConfig> {
    let from_env = std::env::var("PROJECTS_FROM_ENV")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if from_env {
        load_from_env()
    } else {
        let config_file = std::env::var("KEEPALIVE_CONFIG")
            .unwrap_or_else(|_| "keepalive.json".to_string());
        load_from_file(&config_file).await
    }
}

fn load_from_env() -> Result<KeepaliveConfig> {
    let raw = std::env::var("KEEPALIVE_PROJECTS")
        .map_err(|_| anyhow::anyhow!("PROJECTS_FROM_ENV is set but KEEPALIVE_PROJECTS is not"))?;
    parse_config(&raw).context("Invalid config in KEEPALIVE_PROJECTS")
}

async fn load_from_file(file_path: &str) -> Result<KeepaliveConfig> {
    if !Path::new(file_path).exists() {
        return Err(anyhow::anyhow!("Config file not found: {}", file_path));
    }

    let content = fs::read_to_string(file_path).await?;
    parse_config(&content).with_context(|| format!("Invalid config file: {}", file_path))
}

fn parse_config(content: &str) -> Result<KeepaliveConfig> {
    let config: KeepaliveConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

impl ProjectConfig {
    /// A project is authenticated when marked `auth` or carrying a key.
    pub fn authenticated(&self) -> bool {
        self.auth || self.apikey.is_some()
    }

    pub fn probe_method(&self) -> ProbeMethod {
        self.method.unwrap_or(if self.authenticated() {
            ProbeMethod::Get
        } else {
            ProbeMethod::Head
        })
    }

    /// Resolve `endpoint` against `url`, like the browser URL constructor.
    pub fn request_url(&self) -> Result<Url> {
        let base = Url::parse(&self.url)
            .with_context(|| format!("Invalid url for project {}: {}", self.name, self.url))?;
        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint.as_str(),
            None if self.authenticated() => DEFAULT_AUTH_ENDPOINT,
            None => "/",
        };
        base.join(endpoint)
            .with_context(|| format!("Invalid endpoint for project {}: {}", self.name, endpoint))
    }
}
