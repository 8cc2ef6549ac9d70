pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use std::sync::Arc;

use crate::models::lessons::requests::LessonListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::Action;
use crate::storage::Storage;

pub struct LessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_lessons(
        &self,
        request: &HttpRequest,
        query: LessonListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_lessons(self, request, query).await
    }

    pub async fn create_lesson(
        &self,
        request: &HttpRequest,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        create::create_lesson(self, request, body).await
    }

    pub async fn get_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_lesson(self, request, lesson_id).await
    }

    pub async fn replace_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        update::update_lesson(self, request, lesson_id, body, Action::Update).await
    }

    pub async fn patch_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        update::update_lesson(self, request, lesson_id, body, Action::PartialUpdate).await
    }

    pub async fn delete_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lesson(self, request, lesson_id).await
    }
}

pub(crate) fn lesson_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::LessonNotFound,
        "Lesson not found",
    ))
}

// 课时所属课程必须存在
pub(crate) async fn ensure_course_exists(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            format!("Course {course_id} does not exist"),
        ))),
        Err(e) => Err(e.to_response()),
    }
}
