use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::{AppConfig, JwtConfig};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("LMS")
                    .separator("__")
                    .try_parsing(true),
            );

        // 兼容常用的独立环境变量
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "cache.redis.key_prefix",
                std::env::var("REDIS_KEY_PREFIX").ok(),
            )?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.normalize();

        if app_config.is_production() && app_config.jwt.secret == JwtConfig::DEVELOPMENT_SECRET {
            return Err(ConfigError::Message(
                "jwt.secret must be set in production".to_string(),
            ));
        }

        Ok(app_config)
    }

    /// 补全需要运行时推断的配置项
    fn normalize(&mut self) {
        // 处理工作线程数
        if self.server.workers == 0 {
            self.server.workers = num_cpus::get().min(self.server.max_workers.max(1));
        }
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize_from_empty_source() {
        let config: AppConfig = Config::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("empty source should fall back to defaults");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.cache_type, "moka");
        assert_eq!(config.jwt.secret, JwtConfig::DEVELOPMENT_SECRET);
        assert!(config.is_development());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config: AppConfig = Config::builder()
            .set_override("server.port", 9000)
            .and_then(|b| b.set_override("database.url", "sqlite::memory:"))
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .expect("override should deserialize");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.pool_size, 8);
    }

    #[test]
    fn test_workers_are_resolved() {
        let mut config = AppConfig::default();
        config.server.max_workers = 2;
        config.normalize();
        assert!(config.server.workers >= 1 && config.server.workers <= 2);
    }
}
