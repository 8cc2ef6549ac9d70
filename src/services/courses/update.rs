use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use tracing::info;

use super::{CourseService, course_not_found, validate_course_references};
use crate::middlewares::Authenticate;
use crate::models::courses::requests::{CreateCourseRequest, UpdateCourseRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::{AccessRequest, Action, policies};
use crate::services::parse_update;
use crate::utils::validate::validate_title;

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    body: Value,
    action: Action,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    let access = AccessRequest::new(&actor, action);
    if let Err(denial) = policies::COURSES.authorize(&access) {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => return Ok(course_not_found()),
        Err(e) => return Ok(e.to_response()),
    };

    if let Err(denial) = policies::COURSES.authorize_object(&access, &course) {
        return Ok(denial.into_response());
    }

    let parsed = parse_update::<CreateCourseRequest, UpdateCourseRequest>(action, body);
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

    if let Err(resp) = validate_course_references(
        &storage,
        update_data.teacher,
        update_data.students.as_deref(),
    )
    .await
    {
        return Ok(resp);
    }

    match storage.update_course(course_id, update_data).await {
        Ok(Some(course)) => {
            info!("Course {} updated by user {:?}", course.id, actor.id());
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                course,
                "Course updated successfully",
            )))
        }
        Ok(None) => Ok(course_not_found()),
        Err(e) => Ok(e.to_response()),
    }
}
