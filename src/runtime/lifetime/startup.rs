use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{LmsError, Result};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    match get_object_cache_plugin(name) {
        Some(constructor) => constructor().await.map(Arc::from),
        None => Err(LmsError::cache_plugin_not_found(format!(
            "Cache backend '{name}' not found in registry"
        ))),
    }
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
pub async fn create_cache(cache_type: &str) -> Result<Arc<dyn ObjectCache>> {
    warn!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != "moka" => {
            warn!("Failed to create {} cache: {}", cache_type, e);
            warn!("Falling back to memory cache");
            let cache = build_cache("moka").await?;
            warn!("Successfully created fallback Moka (in-memory) cache backend");
            Ok(cache)
        }
        Err(e) => Err(e),
    }
}

/// 初始化默认教师账号
///
/// 数据库中没有任何用户时创建 `admin`，开发环境下打印其访问令牌。
pub async fn seed_admin(storage: &Arc<dyn Storage>) -> Result<()> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!(
            "Database already has {} user(s), skipping admin seed",
            count
        );
        return Ok(());
    }

    info!("No users found in database, creating default teacher account...");
    let admin = storage
        .create_user(CreateUserRequest {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            role: UserRole::Teacher,
        })
        .await?;
    info!(
        "Default teacher account created successfully (ID: {}, username: {})",
        admin.id, admin.username
    );

    if AppConfig::get().is_development() {
        match JwtUtils::generate_access_token(admin.id, UserRole::TEACHER) {
            Ok(token) => {
                warn!("==========================================================");
                warn!("  Development access token for '{}':", admin.username);
                warn!("  {}", token);
                warn!("==========================================================");
            }
            Err(e) => warn!("Failed to issue development token: {}", e),
        }
    }

    Ok(())
}

/// 准备服务器启动的上下文
/// 包括存储和缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // redis 的 TLS 连接依赖进程级的 crypto provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    if let Err(e) = seed_admin(&storage).await {
        warn!("Failed to seed default teacher account: {}", e);
    }

    let cache = create_cache(&AppConfig::get().cache.cache_type).await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::tests::memory_storage;

    #[actix_web::test]
    async fn test_seed_admin_only_once() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);

        seed_admin(&storage).await.unwrap();
        seed_admin(&storage).await.unwrap();

        assert_eq!(storage.count_users().await.unwrap(), 1);
        let admin = storage
            .get_user_by_username(DEFAULT_ADMIN_USERNAME)
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_teacher());
    }

    #[actix_web::test]
    async fn test_unknown_cache_falls_back_to_moka() {
        let cache = create_cache("memcached").await.unwrap();
        cache.insert_raw("k".to_string(), "v".to_string(), 0).await;
        assert_eq!(
            cache.get_raw("k").await,
            crate::cache::CacheResult::Found("v".to_string())
        );
    }
}
