use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::models::courses::requests::CourseListQuery;
use crate::permissions::{AccessRequest, Action, policies};

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseListQuery,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    let access = AccessRequest::new(&actor, Action::List);
    if let Err(denial) = policies::COURSES.authorize(&access) {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    match storage.list_courses_with_pagination(query).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            courses,
            "Courses retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
