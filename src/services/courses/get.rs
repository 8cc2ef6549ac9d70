use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, course_not_found};
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::permissions::{AccessRequest, Action, policies};

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    let access = AccessRequest::new(&actor, Action::Retrieve);
    if let Err(denial) = policies::COURSES.authorize(&access) {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => return Ok(course_not_found()),
        Err(e) => return Ok(e.to_response()),
    };

    // 学生只能查看已选修的课程
    if let Err(denial) = policies::COURSES.authorize_object(&access, &course) {
        return Ok(denial.into_response());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        course,
        "Course retrieved successfully",
    )))
}
