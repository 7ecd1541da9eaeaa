//! config - 配置加载库
//!
//! 配置来源（后者覆盖前者）：
//! 1. 代码内默认值
//! 2. JSON 配置文件
//! 3. 环境变量（见 [`ENV_OVERRIDES`]）

mod env;

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Format, Json},
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

pub use env::{DEFAULT_ENV_PREFIX, ENV_OVERRIDES, EnvOverride};

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "TRACKER_CONFIG_PATH";

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),

    #[error("Invalid value {value:?} for {var}: {reason}")]
    InvalidOverride {
        var: String,
        value: String,
        reason: String,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl From<ConfigError> for errors::AppError {
    fn from(err: ConfigError) -> Self {
        errors::AppError::config(err.to_string())
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    #[serde(rename = "dbtype")]
    pub db_type: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Secret<String>,
    pub dbname: String,
    pub sslmode: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: "postgres".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: Secret::new(String::new()),
            dbname: "timetracker".to_string(),
            sslmode: "disable".to_string(),
            max_connections: 4,
            min_connections: 2,
        }
    }
}

impl DatabaseConfig {
    /// 密码是否已配置
    pub fn has_password(&self) -> bool {
        !self.password.expose_secret().is_empty()
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub app_host: String,
    pub app_port: u16,
    pub request_timeout_secs: u64,
    pub shutdown_grace_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            app_host: "0.0.0.0".to_string(),
            app_port: 8080,
            request_timeout_secs: 30,
            shutdown_grace_secs: 10,
        }
    }
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    #[serde(flatten)]
    pub database: DatabaseConfig,
    #[serde(flatten)]
    pub server: ServerConfig,
    #[serde(flatten)]
    pub telemetry: TelemetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "timetracker".to_string(),
            app_env: "development".to_string(),
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和进程环境变量加载配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, DEFAULT_ENV_PREFIX, |name| std::env::var(name).ok())
    }

    /// 从配置文件加载，并使用给定的查找函数应用环境变量覆盖
    ///
    /// 文件不存在时使用默认值。
    pub fn load_with<F>(
        path: impl AsRef<Path>,
        prefix: &str,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = Figment::new()
            .merge(Json::file(path.as_ref()))
            .extract()?;

        config.apply_env_overrides(prefix, lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// 应用环境变量覆盖，返回被覆盖的字段名
    pub fn apply_env_overrides<F>(
        &mut self,
        prefix: &str,
        lookup: F,
    ) -> Result<Vec<&'static str>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = Vec::new();

        for entry in ENV_OVERRIDES {
            let var = entry.var_name(prefix);
            let Some(value) = lookup(&var).filter(|v| !v.is_empty()) else {
                continue;
            };

            (entry.apply)(self, &value).map_err(|reason| ConfigError::InvalidOverride {
                var,
                value,
                reason,
            })?;
            applied.push(entry.field);
        }

        Ok(applied)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.db_type != "postgres" {
            return Err(ConfigError::Invalid(format!(
                "unsupported dbtype {:?}, only \"postgres\" is supported",
                self.database.db_type
            )));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "max_connections must be greater than 0".to_string(),
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid(format!(
                "min_connections ({}) cannot exceed max_connections ({})",
                self.database.min_connections, self.database.max_connections
            )));
        }
        if self.server.app_host.trim().is_empty() {
            return Err(ConfigError::Invalid("app_host must not be empty".to_string()));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// 配置文件路径：优先读取 `TRACKER_CONFIG_PATH`
    pub fn config_path() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 单个请求的数据库操作时限
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// 收到关闭信号后，取消在途数据库操作前的等待时间
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_grace_secs)
    }
}
