//! Server settings read from `config.json` / 服务配置
//!
//! The file sits in the working directory unless `VOCAB_CONFIG` points
//! elsewhere. A missing file is written out with defaults on first start.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "VOCAB_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// Where the vocab table lives / 词汇数据库位置
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP listener / 监听地址
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Directory created on startup if missing
    pub data_dir: String,
    /// SQLite file name inside `data_dir` / 数据库文件名
    pub db_file: String,
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8180,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            db_file: "vocab.db".to_string(),
            max_connections: 5,
        }
    }
}

impl AppConfig {
    /// sqlx URL for the vocab database, created on first open
    pub fn database_url(&self) -> String {
        let db_path = self.data_dir().join(&self.database.db_file);
        format!("sqlite:{}?mode=rwc", db_path.to_string_lossy())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.database.data_dir)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// `$VOCAB_CONFIG`, else ./config.json / 配置文件路径
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

pub fn load_config() -> Result<AppConfig, String> {
    load_config_from(&config_path())
}

/// Read settings, writing defaults when the file does not exist yet / 读取配置，不存在时写入默认值
pub fn load_config_from(path: &Path) -> Result<AppConfig, String> {
    if !path.exists() {
        let config = AppConfig::default();
        save_config(&config, path)?;
        tracing::info!("Wrote default settings to {:?}", path);
        return Ok(config);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file: {}", e))?;
    let config: AppConfig = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse config file: {}", e))?;

    tracing::info!("Settings loaded from {:?}", path);
    Ok(config)
}

pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), String> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(path, content)
        .map_err(|e| format!("Failed to write config file: {}", e))
}
