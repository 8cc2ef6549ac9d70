/*!
 * 认证中间件
 *
 * 解析可选的 `Authorization: Bearer <JWT>` 请求头，把当前请求方 [`Actor`] 放入请求扩展。
 *
 * - 未携带请求头：匿名访问，由各端点的权限规则决定是否放行
 * - 携带请求头但令牌无效、已过期或用户不存在：直接返回 401
 *
 * 处理程序中通过 [`Authenticate::extract_actor`] 读取：
 * ```rust,ignore
 * async fn handler(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let actor = Authenticate::extract_actor(&req);
 *     // ...
 * }
 * ```
 *
 * 查询到的用户按令牌缓存在对象缓存中，TTL 为 `cache.default_ttl`。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::models::ErrorCode;
use crate::models::users::entities::{Actor, User};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::AUTHORIZATION,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct Authenticate;

enum AuthFailure {
    // 凭证无效（401）
    Rejected(String),
    // 依赖缺失或存储出错（500）
    Internal(String),
}

fn cache_key(token: &str) -> String {
    format!("actor:{token}")
}

// 辅助函数：解析请求方身份
async fn resolve_actor(req: &ServiceRequest) -> Result<Actor, AuthFailure> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Ok(Actor::Anonymous);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AuthFailure::Rejected("Invalid Authorization header".to_string()))?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Rejected("Invalid JWT token".to_string())
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AuthFailure::Internal("Cache not found in app data".to_string()))?;

    if let CacheResult::Found(user) = cache.get_json::<User>(&cache_key(token)).await {
        return Ok(Actor::User(user));
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| AuthFailure::Internal("Storage not found in app data".to_string()))?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| AuthFailure::Rejected("Invalid user ID in JWT".to_string()))?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| AuthFailure::Internal(e.to_string()))?
        .ok_or_else(|| AuthFailure::Rejected("User not found".to_string()))?;

    cache.insert_json(cache_key(token), &user, 0).await;

    Ok(Actor::User(user))
}

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthenticateMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthenticateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            match resolve_actor(&req).await {
                Ok(actor) => {
                    if let Some(id) = actor.id() {
                        debug!("Authenticated request from user {}", id);
                    }
                    req.extensions_mut().insert(actor);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(AuthFailure::Rejected(err)) => {
                    info!("Authentication failed for request to {}: {}", req.path(), err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(AuthFailure::Internal(err)) => {
                    error!("Authentication error for request to {}: {}", req.path(), err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Internal server error",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl Authenticate {
    /// 从请求扩展中提取当前请求方，未经过中间件时视为匿名
    pub fn extract_actor(req: &HttpRequest) -> Actor {
        req.extensions().get::<Actor>().cloned().unwrap_or_default()
    }
}
