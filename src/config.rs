use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Base URLs of the three backing services
    #[serde(default)]
    pub services: ServiceEndpoints,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "bankmore-client.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
            services: ServiceEndpoints::default(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceEndpoints {
    pub account_url: String,
    pub transfer_url: String,
    pub fee_url: String,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            account_url: "http://localhost:5001".to_string(),
            transfer_url: "http://localhost:5002".to_string(),
            fee_url: "http://localhost:5003".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        serde_yaml::from_str(&content).context("Failed to parse config yaml")
    }
}
