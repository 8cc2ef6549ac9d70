use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::models::courses::requests::CourseListQuery;
use crate::services::CourseService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(&req, body.into_inner()).await
}

pub async fn get_course(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, path.0).await
}

pub async fn replace_course(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .replace_course(&req, path.0, body.into_inner())
        .await
}

pub async fn patch_course(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .patch_course(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_course(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, path.0).await
}

// 选课
pub async fn enroll(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.enroll(&req, path.0).await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/courses")
            .service(
                web::resource("/")
                    .route(web::get().to(list_courses))
                    .route(web::post().to(create_course)),
            )
            .service(
                web::resource("/{id}/")
                    .route(web::get().to(get_course))
                    .route(web::put().to(replace_course))
                    .route(web::patch().to(patch_course))
                    .route(web::delete().to(delete_course)),
            )
            .service(web::resource("/{id}/enroll/").route(web::post().to(enroll))),
    );
}
