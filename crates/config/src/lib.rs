//! 统一配置中心
//!
//! 提供服务的全局配置，包括：
//! - 监听地址
//! - MySQL 连接
//! - 价格预测服务地址
//!
//! 加载优先级：默认值 -> `CARS_API_CONFIG_FILE` 指向的文件 -> `CARS_API_*` 环境变量
//! -> 兼容旧部署的 `DB_HOST` / `DB_USER` / `DB_PASSWORD` / `DB_NAME` / `PORT`。

use std::env;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 环境变量前缀，嵌套字段以 `__` 分隔，例如 `CARS_API_SERVER__PORT`
pub const ENV_PREFIX: &str = "CARS_API";

/// 指定配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "CARS_API_CONFIG_FILE";

/// 旧部署使用的环境变量及其对应的配置键，优先级最高
const LEGACY_ENV: [(&str, &str); 5] = [
    ("DB_HOST", "database.host"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
    ("PORT", "database.port"),
];

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub database: DatabaseConfig,
    #[validate(nested)]
    pub predictor: PredictorConfig,
}

/// 服务配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
}

/// 数据库配置
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(length(min = 1))]
    pub user: String,
    pub password: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub port: u16,
    #[validate(range(min = 1))]
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// 启动时执行建表迁移；表通常由外部预先创建
    pub run_migrations: bool,
}

/// 价格预测服务配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictorConfig {
    #[validate(url)]
    pub base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 4000,
            },
            database: DatabaseConfig {
                host: "127.0.0.1".to_string(),
                user: "root".to_string(),
                password: String::new(),
                name: "cars".to_string(),
                port: 3306,
                max_connections: 10,
                acquire_timeout_seconds: 30,
                run_migrations: false,
            },
            predictor: PredictorConfig {
                base_url: "http://127.0.0.1:5000".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// 从进程环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|key| env::var(key).ok(), true)
    }

    /// 从给定的键值查找函数加载，不读取 `CARS_API_*` 进程环境变量
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load(lookup, false)
    }

    fn load<F>(lookup: F, with_environment: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = lookup(CONFIG_FILE_ENV) {
            builder = builder.add_source(File::with_name(&path));
        }

        if with_environment {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        for (var, key) in LEGACY_ENV {
            builder = builder.set_override_option(key, lookup(var))?;
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    /// 不含密码的连接目标，用于日志
    pub fn display_target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name)
    }
}

// 手写 Debug，避免密码进入日志
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_seconds", &self.acquire_timeout_seconds)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}
