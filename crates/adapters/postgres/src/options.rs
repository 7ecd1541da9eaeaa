//! PostgreSQL 配置模块
//!
//! 连接参数和连接池设置

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// SSL 模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    /// 禁用 SSL
    #[default]
    Disable,
    /// 允许 SSL（如果服务器支持）
    Prefer,
    /// 要求 SSL
    Require,
    /// 验证 CA 证书
    VerifyCa,
    /// 验证完整证书链
    VerifyFull,
}

impl SslMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyFull => "verify-full",
        }
    }

    fn to_pg(self) -> PgSslMode {
        match self {
            SslMode::Disable => PgSslMode::Disable,
            SslMode::Prefer => PgSslMode::Prefer,
            SslMode::Require => PgSslMode::Require,
            SslMode::VerifyCa => PgSslMode::VerifyCa,
            SslMode::VerifyFull => PgSslMode::VerifyFull,
        }
    }
}

impl FromStr for SslMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => Err(format!("unknown sslmode {:?}", other)),
        }
    }
}

/// PostgreSQL 配置
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: Option<Secret<String>>,
    pub ssl_mode: SslMode,

    /// 最大连接数
    pub pool_max: u32,
    /// 保持的最小连接数
    pub pool_min: u32,
    /// 获取连接超时
    pub acquire_timeout: Duration,
    /// 空闲超时
    pub idle_timeout: Duration,
    /// 应用名称（用于连接标识）
    pub application_name: Option<String>,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "postgres".to_string(),
            username: "postgres".to_string(),
            password: None,
            ssl_mode: SslMode::default(),
            pool_max: 4,
            pool_min: 2,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            application_name: None,
        }
    }
}

impl PostgresConfig {
    /// 从组件创建配置
    pub fn from_components(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            username: username.into(),
            ..Default::default()
        }
    }

    /// 从应用配置创建
    pub fn from_app_config(config: &::config::AppConfig) -> Result<Self, String> {
        let db = &config.database;
        let mut pg = Self::from_components(&db.host, db.port, &db.dbname, &db.user)
            .with_ssl_mode(db.sslmode.parse()?)
            .with_pool(db.min_connections, db.max_connections)
            .with_application_name(&config.app_name);
        if db.has_password() {
            pg = pg.with_password(db.password.expose_secret().as_str());
        }
        Ok(pg)
    }

    /// 设置密码
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Secret::new(password.into()));
        self
    }

    /// 设置 SSL 模式
    pub fn with_ssl_mode(mut self, mode: SslMode) -> Self {
        self.ssl_mode = mode;
        self
    }

    /// 设置连接池配置
    pub fn with_pool(mut self, min: u32, max: u32) -> Self {
        self.pool_min = min;
        self.pool_max = max;
        self
    }

    /// 设置应用名称
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// 不含密码的连接描述，用于日志
    pub fn redacted_dsn(&self) -> String {
        format!(
            "postgres://{}@{}:{}/{}?sslmode={}",
            self.username,
            self.host,
            self.port,
            self.database,
            self.ssl_mode.as_str()
        )
    }

    /// 构建 sqlx 连接参数
    pub fn connect_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.username)
            .ssl_mode(self.ssl_mode.to_pg());

        if let Some(password) = &self.password {
            options = options.password(password.expose_secret());
        }
        if let Some(name) = &self.application_name {
            options = options.application_name(name);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PostgresConfig::default();
        assert_eq!(config.pool_min, 2);
        assert_eq!(config.pool_max, 4);
        assert_eq!(config.ssl_mode, SslMode::Disable);
        assert_eq!(config.port, 5432);
    }

    #[test]
    fn test_config_from_components() {
        let config = PostgresConfig::from_components("db.example.com", 5433, "tracking", "admin")
            .with_password("secret")
            .with_pool(1, 8);

        assert_eq!(config.host, "db.example.com");
        assert_eq!(config.port, 5433);
        assert_eq!(config.database, "tracking");
        assert_eq!(config.username, "admin");
        assert_eq!(config.pool_max, 8);
        assert!(config.password.is_some());
    }

    #[test]
    fn test_redacted_dsn_hides_password() {
        let config = PostgresConfig::from_components("localhost", 5432, "tracking", "tracker")
            .with_password("hunter2")
            .with_ssl_mode(SslMode::Require);

        let dsn = config.redacted_dsn();
        assert_eq!(dsn, "postgres://tracker@localhost:5432/tracking?sslmode=require");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[test]
    fn test_ssl_mode_parse() {
        assert_eq!("disable".parse::<SslMode>(), Ok(SslMode::Disable));
        assert_eq!("Verify-Full".parse::<SslMode>(), Ok(SslMode::VerifyFull));
        assert!("sometimes".parse::<SslMode>().is_err());
    }

    #[test]
    fn test_from_app_config() {
        let mut app = ::config::AppConfig::default();
        app.database.host = "pg".to_string();
        app.database.dbname = "tt".to_string();
        app.database.max_connections = 6;
        app.database.min_connections = 1;

        let pg = PostgresConfig::from_app_config(&app).unwrap();
        assert_eq!(pg.host, "pg");
        assert_eq!(pg.database, "tt");
        assert_eq!(pg.pool_max, 6);
        assert_eq!(pg.pool_min, 1);
        assert!(pg.password.is_none());
        assert_eq!(pg.application_name.as_deref(), Some("timetracker"));
    }

    #[test]
    fn test_from_app_config_rejects_bad_sslmode() {
        let mut app = ::config::AppConfig::default();
        app.database.sslmode = "maybe".to_string();
        assert!(PostgresConfig::from_app_config(&app).is_err());
    }
}
