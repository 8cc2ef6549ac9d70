use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::models::assignments::requests::AssignmentListQuery;
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_assignments(&req, query.into_inner()).await
}

pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.create_assignment(&req, body.into_inner()).await
}

pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, path.0).await
}

pub async fn replace_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .replace_assignment(&req, path.0, body.into_inner())
        .await
}

pub async fn patch_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .patch_assignment(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, path.0).await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/assignments")
            .service(
                web::resource("/")
                    .route(web::get().to(list_assignments))
                    .route(web::post().to(create_assignment)),
            )
            .service(
                web::resource("/{id}/")
                    .route(web::get().to(get_assignment))
                    .route(web::put().to(replace_assignment))
                    .route(web::patch().to(patch_assignment))
                    .route(web::delete().to(delete_assignment)),
            ),
    );
}
