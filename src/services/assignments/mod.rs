pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use std::sync::Arc;

use crate::models::assignments::requests::AssignmentListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::Action;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: AssignmentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, body).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_assignment(self, request, assignment_id).await
    }

    pub async fn replace_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(
            self,
            request,
            assignment_id,
            body,
            Action::Update,
        )
        .await
    }

    pub async fn patch_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, assignment_id, body, Action::PartialUpdate)
            .await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }
}

pub(crate) fn assignment_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::AssignmentNotFound,
        "Assignment not found",
    ))
}

pub(crate) async fn ensure_lesson_exists(
    storage: &Arc<dyn Storage>,
    lesson_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_lesson_by_id(lesson_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::LessonNotFound,
            format!("Lesson {lesson_id} does not exist"),
        ))),
        Err(e) => Err(e.to_response()),
    }
}
