use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonService, lesson_not_found};
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::permissions::{AccessRequest, Action, policies};

pub async fn delete_lesson(
    service: &LessonService,
    request: &HttpRequest,
    lesson_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) = policies::LESSONS.authorize(&AccessRequest::new(&actor, Action::Destroy)) {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    match storage.delete_lesson(lesson_id).await {
        Ok(true) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success_empty("Lesson deleted successfully"))),
        Ok(false) => Ok(lesson_not_found()),
        Err(e) => Ok(e.to_response()),
    }
}
