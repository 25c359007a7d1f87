use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation-serving API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Directory holding the CSV datasets
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Product catalog file name (optional dataset)
    #[serde(default = "default_products_file")]
    pub products_file: String,

    /// User-item interaction file name
    #[serde(default = "default_user_item_file")]
    pub user_item_file: String,

    /// Association rules file name
    #[serde(default = "default_rules_file")]
    pub rules_file: String,

    /// Per-call timeout for recommendation requests, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_products_file() -> String {
    "products.csv".to_string()
}

fn default_user_item_file() -> String {
    "user_item_dl.csv".to_string()
}

fn default_rules_file() -> String {
    "rules.csv".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn user_item_path(&self) -> PathBuf {
        self.data_dir.join(&self.user_item_file)
    }

    pub fn rules_path(&self) -> PathBuf {
        self.data_dir.join(&self.rules_file)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
