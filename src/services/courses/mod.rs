pub mod create;
pub mod delete;
pub mod enroll;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use std::sync::Arc;

use crate::models::courses::requests::CourseListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::Action;
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取课程列表
    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, body).await
    }

    // 根据课程 ID 获取课程信息
    pub async fn get_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, request, course_id).await
    }

    // PUT：整体更新
    pub async fn replace_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_id, body, Action::Update).await
    }

    // PATCH：部分更新
    pub async fn patch_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
        body: Value,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_id, body, Action::PartialUpdate).await
    }

    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_id).await
    }

    // 当前用户选修课程
    pub async fn enroll(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        enroll::enroll(self, request, course_id).await
    }
}

pub(crate) fn course_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::CourseNotFound,
        "Course not found",
    ))
}

/// 校验课程引用的教师与学生
///
/// 教师必须存在且角色为教师；学生名单中的每个 ID 都必须存在。
pub(crate) async fn validate_course_references(
    storage: &Arc<dyn Storage>,
    teacher: Option<i64>,
    students: Option<&[i64]>,
) -> Result<(), HttpResponse> {
    if let Some(teacher_id) = teacher {
        match storage.get_user_by_id(teacher_id).await {
            Ok(Some(user)) if user.is_teacher() => {}
            Ok(_) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CourseTeacherInvalid,
                    "Teacher must be an existing user with the teacher role",
                )));
            }
            Err(e) => return Err(e.to_response()),
        }
    }

    if let Some(students) = students
        && !students.is_empty()
    {
        let mut wanted = students.to_vec();
        wanted.sort_unstable();
        wanted.dedup();

        match storage.get_users_by_ids(&wanted).await {
            Ok(found) if found.len() == wanted.len() => {}
            Ok(found) => {
                let missing: Vec<String> = wanted
                    .iter()
                    .filter(|id| !found.iter().any(|user| user.id == **id))
                    .map(|id| id.to_string())
                    .collect();
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    format!("Students not found: {}", missing.join(", ")),
                )));
            }
            Err(e) => return Err(e.to_response()),
        }
    }

    Ok(())
}
