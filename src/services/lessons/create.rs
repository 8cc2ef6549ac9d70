use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use tracing::info;

use super::{LessonService, ensure_course_exists};
use crate::middlewares::Authenticate;
use crate::models::lessons::requests::CreateLessonRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::{AccessRequest, Action, policies};
use crate::services::parse_body;
use crate::utils::validate::validate_title;

pub async fn create_lesson(
    service: &LessonService,
    request: &HttpRequest,
    body: Value,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) = policies::LESSONS.authorize(&AccessRequest::new(&actor, Action::Create)) {
        return Ok(denial.into_response());
    }

    let lesson_data: CreateLessonRequest = match parse_body(body) {
        Ok(data) => data,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_title(&lesson_data.title) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    if let Err(resp) = ensure_course_exists(&storage, lesson_data.course).await {
        return Ok(resp);
    }

    match storage.create_lesson(lesson_data).await {
        Ok(lesson) => {
            info!("Lesson {} created in course {}", lesson.id, lesson.course);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                lesson,
                "Lesson created successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}
