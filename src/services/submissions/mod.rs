pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use std::sync::Arc;

use crate::models::submissions::requests::SubmissionQueryParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::Action;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 列出提交，学生只能看到自己的提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        query: SubmissionQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, query).await
    }

    // 提交者始终是当前用户
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, body).await
    }

    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_submission(self, request, submission_id).await
    }

    pub async fn replace_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        update::update_submission(
            self,
            request,
            submission_id,
            body,
            Action::Update,
        )
        .await
    }

    pub async fn patch_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        update::update_submission(self, request, submission_id, body, Action::PartialUpdate)
            .await
    }

    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, submission_id).await
    }
}

pub(crate) fn submission_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::SubmissionNotFound,
        "Submission not found",
    ))
}

// 只有教师可以评分
pub(crate) fn grade_forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::SubmissionGradeForbidden,
        "Only teachers can grade submissions",
    ))
}

pub(crate) async fn ensure_assignment_exists(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            format!("Assignment {assignment_id} does not exist"),
        ))),
        Err(e) => Err(e.to_response()),
    }
}
