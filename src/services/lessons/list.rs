use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::models::lessons::requests::LessonListQuery;
use crate::permissions::{AccessRequest, Action, policies};

pub async fn list_lessons(
    service: &LessonService,
    request: &HttpRequest,
    query: LessonListQuery,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) = policies::LESSONS.authorize(&AccessRequest::new(&actor, Action::List)) {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    match storage.list_lessons_with_pagination(query).await {
        Ok(lessons) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lessons,
            "Lessons retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
