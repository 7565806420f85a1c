use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::common::config::{load_config, ServiceConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Directory of a built frontend to serve at `/`
    #[serde(default)]
    pub static_dir: Option<String>,
    /// Origins allowed to call the API from a browser. Empty disables CORS,
    /// `["*"]` allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            static_dir: None,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Loads the file and overlays the service settings from the environment.
    pub fn from_file(path: &str) -> Result<Self> {
        let mut config: ServerConfig = load_config(path)?;
        config.service = config.service.with_env();
        Ok(config)
    }
}
