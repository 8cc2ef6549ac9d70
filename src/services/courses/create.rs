use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use tracing::info;

use super::{CourseService, validate_course_references};
use crate::middlewares::Authenticate;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::{AccessRequest, Action, policies};
use crate::services::parse_body;
use crate::utils::validate::validate_title;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    body: Value,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    let access = AccessRequest::new(&actor, Action::Create);
    if let Err(denial) = policies::COURSES.authorize(&access) {
        return Ok(denial.into_response());
    }

    let course_data: CreateCourseRequest = match parse_body(body) {
        Ok(data) => data,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_title(&course_data.title) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    if let Err(resp) = validate_course_references(
        &storage,
        Some(course_data.teacher),
        Some(&course_data.students),
    )
    .await
    {
        return Ok(resp);
    }

    match storage.create_course(course_data).await {
        Ok(course) => {
            info!("Course {} created by user {:?}", course.id, actor.id());
            Ok(HttpResponse::Created().json(ApiResponse::success(
                course,
                "Course created successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}
