//! 环境变量覆盖表
//!
//! 每个可覆盖字段显式列出：字段名、环境变量后缀、setter。
//! 变量名为前缀 + 后缀，例如 `TRACKER_` + `DB_TYPE`。

use secrecy::Secret;

use crate::AppConfig;

/// 服务默认使用的环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "TRACKER_";

type Setter = fn(&mut AppConfig, &str) -> Result<(), String>;

/// 一条环境变量覆盖规则
pub struct EnvOverride {
    /// 配置文件中的字段名
    pub field: &'static str,
    /// 环境变量名（不含前缀）
    pub suffix: &'static str,
    pub(crate) apply: Setter,
}

impl EnvOverride {
    /// 带前缀的完整环境变量名
    pub fn var_name(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.suffix)
    }
}

fn parse<T: std::str::FromStr>(value: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| e.to_string())
}

pub const ENV_OVERRIDES: &[EnvOverride] = &[
    EnvOverride {
        field: "app_name",
        suffix: "APP_NAME",
        apply: |c, v| {
            c.app_name = v.to_string();
            Ok(())
        },
    },
    EnvOverride {
        field: "app_env",
        suffix: "APP_ENV",
        apply: |c, v| {
            c.app_env = v.to_string();
            Ok(())
        },
    },
    EnvOverride {
        field: "dbtype",
        suffix: "DB_TYPE",
        apply: |c, v| {
            c.database.db_type = v.to_string();
            Ok(())
        },
    },
    EnvOverride {
        field: "host",
        suffix: "HOST",
        apply: |c, v| {
            c.database.host = v.to_string();
            Ok(())
        },
    },
    EnvOverride {
        field: "port",
        suffix: "PORT",
        apply: |c, v| {
            c.database.port = parse(v)?;
            Ok(())
        },
    },
    EnvOverride {
        field: "user",
        suffix: "USER",
        apply: |c, v| {
            c.database.user = v.to_string();
            Ok(())
        },
    },
    EnvOverride {
        field: "password",
        suffix: "PASSWORD",
        apply: |c, v| {
            c.database.password = Secret::new(v.to_string());
            Ok(())
        },
    },
    EnvOverride {
        field: "dbname",
        suffix: "DBNAME",
        apply: |c, v| {
            c.database.dbname = v.to_string();
            Ok(())
        },
    },
    EnvOverride {
        field: "sslmode",
        suffix: "SSL_MODE",
        apply: |c, v| {
            c.database.sslmode = v.to_string();
            Ok(())
        },
    },
    EnvOverride {
        field: "max_connections",
        suffix: "MAX_CONNECTIONS",
        apply: |c, v| {
            c.database.max_connections = parse(v)?;
            Ok(())
        },
    },
    EnvOverride {
        field: "min_connections",
        suffix: "MIN_CONNECTIONS",
        apply: |c, v| {
            c.database.min_connections = parse(v)?;
            Ok(())
        },
    },
    EnvOverride {
        field: "app_host",
        suffix: "APP_HOST",
        apply: |c, v| {
            c.server.app_host = v.to_string();
            Ok(())
        },
    },
    EnvOverride {
        field: "app_port",
        suffix: "APP_PORT",
        apply: |c, v| {
            c.server.app_port = parse(v)?;
            Ok(())
        },
    },
    EnvOverride {
        field: "request_timeout_secs",
        suffix: "REQUEST_TIMEOUT_SECS",
        apply: |c, v| {
            c.server.request_timeout_secs = parse(v)?;
            Ok(())
        },
    },
    EnvOverride {
        field: "shutdown_grace_secs",
        suffix: "SHUTDOWN_GRACE_SECS",
        apply: |c, v| {
            c.server.shutdown_grace_secs = parse(v)?;
            Ok(())
        },
    },
    EnvOverride {
        field: "log_level",
        suffix: "LOG_LEVEL",
        apply: |c, v| {
            c.telemetry.log_level = v.to_string();
            Ok(())
        },
    },
];
