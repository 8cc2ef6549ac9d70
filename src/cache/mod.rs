//! 对象缓存
//!
//! 缓存后端以插件形式在程序加载时注册（见 [`declare_object_cache_plugin!`]），
//! 启动时按 `cache.type` 选择。

pub mod object_cache;
pub mod register;
mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个缓存插件
///
/// 类型需要提供 `fn with_config(&CacheConfig) -> crate::errors::Result<Self>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let config = $crate::config::AppConfig::get();
                        <$ty>::with_config(&config.cache).map(|cache| {
                            Box::new(cache) as Box<dyn $crate::cache::ObjectCache>
                        })
                    })
                }),
            );
        }
    };
}
