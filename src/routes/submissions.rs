use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::models::submissions::requests::SubmissionQueryParams;
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionQueryParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_submissions(&req, query.into_inner()).await
}

pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.create_submission(&req, body.into_inner()).await
}

pub async fn get_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, path.0).await
}

pub async fn replace_submission(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .replace_submission(&req, path.0, body.into_inner())
        .await
}

pub async fn patch_submission(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .patch_submission(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.delete_submission(&req, path.0).await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/submissions")
            .service(
                web::resource("/")
                    .route(web::get().to(list_submissions))
                    .route(web::post().to(create_submission)),
            )
            .service(
                web::resource("/{id}/")
                    .route(web::get().to(get_submission))
                    .route(web::put().to(replace_submission))
                    .route(web::patch().to(patch_submission))
                    .route(web::delete().to(delete_submission)),
            ),
    );
}
