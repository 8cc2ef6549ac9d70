//! JWT 校验
//!
//! 令牌由外部签发方以 HS256 + `jwt.secret` 签发，本服务只负责校验；
//! 生成函数供启动时的默认账号和测试使用。

use crate::config::{AppConfig, JwtConfig};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_TYPE: &str = "access";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

pub struct JwtUtils;

impl JwtUtils {
    // 生成 Access Token（使用全局配置）
    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = &AppConfig::get().jwt;
        Self::generate_token_with_expiry(
            config,
            user_id,
            role,
            ACCESS_TOKEN_TYPE,
            chrono::Duration::minutes(config.access_token_expiry),
        )
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        config: &JwtConfig,
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp().max(0) as usize,
        };

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证 JWT token（签名与过期时间）
    pub fn verify_token(
        config: &JwtConfig,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    // 验证 Access Token（使用全局配置）
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_access_token_with(&AppConfig::get().jwt, token)
    }

    pub fn verify_access_token_with(
        config: &JwtConfig,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = Self::verify_token(config, token)?;
        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }
}
