use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::models::reviews::requests::ReviewQueryParams;
use crate::services::ReviewService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ReviewService 实例
static REVIEW_SERVICE: Lazy<ReviewService> = Lazy::new(ReviewService::new_lazy);

pub async fn list_reviews(
    req: HttpRequest,
    query: web::Query<ReviewQueryParams>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.list_reviews(&req, query.into_inner()).await
}

// 评价者必须已选修 course 指向的课程
pub async fn create_review(
    req: HttpRequest,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.create_review(&req, body.into_inner()).await
}

pub async fn get_review(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.get_review(&req, path.0).await
}

pub async fn replace_review(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .replace_review(&req, path.0, body.into_inner())
        .await
}

pub async fn patch_review(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<Value>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .patch_review(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_review(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.delete_review(&req, path.0).await
}

// 配置路由
pub fn configure_reviews_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/reviews")
            .service(
                web::resource("/")
                    .route(web::get().to(list_reviews))
                    .route(web::post().to(create_review)),
            )
            .service(
                web::resource("/{id}/")
                    .route(web::get().to(get_review))
                    .route(web::put().to(replace_review))
                    .route(web::patch().to(patch_review))
                    .route(web::delete().to(delete_review)),
            ),
    );
}
