pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use std::sync::Arc;

use crate::models::reviews::requests::ReviewQueryParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::Action;
use crate::storage::Storage;

pub struct ReviewService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReviewService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 学生只能看到自己选修课程的评价
    pub async fn list_reviews(
        &self,
        request: &HttpRequest,
        query: ReviewQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_reviews(self, request, query).await
    }

    pub async fn create_review(
        &self,
        request: &HttpRequest,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        create::create_review(self, request, body).await
    }

    pub async fn get_review(
        &self,
        request: &HttpRequest,
        review_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_review(self, request, review_id).await
    }

    pub async fn replace_review(
        &self,
        request: &HttpRequest,
        review_id: i64,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        update::update_review(self, request, review_id, body, Action::Update).await
    }

    pub async fn patch_review(
        &self,
        request: &HttpRequest,
        review_id: i64,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        update::update_review(self, request, review_id, body, Action::PartialUpdate).await
    }

    pub async fn delete_review(
        &self,
        request: &HttpRequest,
        review_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_review(self, request, review_id).await
    }
}

pub(crate) fn review_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ReviewNotFound,
        "Review not found",
    ))
}

pub(crate) fn rating_invalid(msg: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ReviewRatingInvalid,
        msg,
    ))
}
