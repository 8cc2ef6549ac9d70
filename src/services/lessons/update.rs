use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;

use super::{LessonService, ensure_course_exists, lesson_not_found};
use crate::middlewares::Authenticate;
use crate::models::lessons::requests::{CreateLessonRequest, UpdateLessonRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::{AccessRequest, Action, policies};
use crate::services::parse_update;
use crate::utils::validate::validate_title;

pub async fn update_lesson(
    service: &LessonService,
    request: &HttpRequest,
    lesson_id: i64,
    body: Value,
    action: Action,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) = policies::LESSONS.authorize(&AccessRequest::new(&actor, action)) {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    match storage.get_lesson_by_id(lesson_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(lesson_not_found()),
        Err(e) => return Ok(e.to_response()),
    }

    let parsed = parse_update::<CreateLessonRequest, UpdateLessonRequest>(action, body);
    let update_data = match parsed {
        Ok(data) => data,
        Err(resp) => return Ok(resp),
    };

    if let Some(title) = &update_data.title
        && let Err(msg) = validate_title(title)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    if let Some(course_id) = update_data.course
        && let Err(resp) = ensure_course_exists(&storage, course_id).await
    {
        return Ok(resp);
    }

    match storage.update_lesson(lesson_id, update_data).await {
        Ok(Some(lesson)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lesson,
            "Lesson updated successfully",
        ))),
        Ok(None) => Ok(lesson_not_found()),
        Err(e) => Ok(e.to_response()),
    }
}
