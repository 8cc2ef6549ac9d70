use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::models::lessons::requests::LessonListQuery;
use crate::services::LessonService;
use crate::utils::SafeIDI64;

// 懒加载的全局 LessonService 实例
static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);

pub async fn list_lessons(
    req: HttpRequest,
    query: web::Query<LessonListQuery>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(&req, query.into_inner()).await
}

pub async fn create_lesson(
    req: HttpRequest,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.create_lesson(&req, body.into_inner()).await
}

pub async fn get_lesson(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.get_lesson(&req, path.0).await
}

pub async fn replace_lesson(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .replace_lesson(&req, path.0, body.into_inner())
        .await
}

pub async fn patch_lesson(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .patch_lesson(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_lesson(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(&req, path.0).await
}

// 配置路由
pub fn configure_lessons_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/lessons")
            .service(
                web::resource("/")
                    .route(web::get().to(list_lessons))
                    .route(web::post().to(create_lesson)),
            )
            .service(
                web::resource("/{id}/")
                    .route(web::get().to(get_lesson))
                    .route(web::put().to(replace_lesson))
                    .route(web::patch().to(patch_lesson))
                    .route(web::delete().to(delete_lesson)),
            ),
    );
}
