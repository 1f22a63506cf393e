use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub github: GitHubConfig,
    pub trello: TrelloConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct GitHubConfig {
    pub token: String,
}

// Manual Debug impl to avoid leaking the access token
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Deserialize, Clone)]
pub struct TrelloConfig {
    pub api_key: String,
    pub api_token: String,
}

// Manual Debug impl to avoid leaking the credentials
impl std::fmt::Debug for TrelloConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrelloConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkflowConfig {
    /// Branch new work branches fork from and pull requests target.
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            base_branch: default_base_branch(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShellConfig {
    #[serde(default = "default_allowed_programs")]
    pub allowed_programs: Vec<String>,
    #[serde(default = "default_command_timeout")]
    pub timeout_secs: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            allowed_programs: default_allowed_programs(),
            timeout_secs: default_command_timeout(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct KnowledgeConfig {
    /// Optional TOML file with extra documentation topics.
    pub docs_path: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_branch() -> String {
    "main".to_string()
}

fn default_allowed_programs() -> Vec<String> {
    ["git", "cargo", "npm", "make", "ls"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_command_timeout() -> u64 {
    120
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            // Try default paths
            builder = builder.add_source(config::File::with_name("taskpilot").required(false));
        }

        // Environment variable overrides with TASKPILOT_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("TASKPILOT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}
