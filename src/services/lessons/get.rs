use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonService, lesson_not_found};
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::permissions::{AccessRequest, Action, policies};

pub async fn get_lesson(
    service: &LessonService,
    request: &HttpRequest,
    lesson_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    let access = AccessRequest::new(&actor, Action::Retrieve);
    if let Err(denial) = policies::LESSONS.authorize(&access) {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    match storage.get_lesson_by_id(lesson_id).await {
        Ok(Some(lesson)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lesson,
            "Lesson retrieved successfully",
        ))),
        Ok(None) => Ok(lesson_not_found()),
        Err(e) => Ok(e.to_response()),
    }
}
