use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, course_not_found};
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::permissions::{AccessRequest, Action, policies};

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    let access = AccessRequest::new(&actor, Action::Destroy);
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

    match storage.delete_course(course_id).await {
        Ok(true) => {
            info!("Course {} deleted by user {:?}", course_id, actor.id());
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully")))
        }
        Ok(false) => Ok(course_not_found()),
        Err(e) => Ok(e.to_response()),
    }
}
