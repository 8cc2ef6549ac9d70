use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::services::UserService;
use crate::utils::SafeIDI64;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// HTTP处理程序
pub async fn me(req: HttpRequest) -> ActixResult<HttpResponse> {
    USER_SERVICE.me(&req).await
}

pub async fn create_user(
    req: HttpRequest,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(&req, body.into_inner()).await
}

pub async fn get_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(&req, user_id.0).await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .service(web::resource("/").route(web::post().to(create_user)))
            // me 必须在 {id} 之前注册
            .service(web::resource("/me/").route(web::get().to(me)))
            .service(web::resource("/{id}/").route(web::get().to(get_user))),
    );
}
