use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, course_not_found};
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::models::courses::responses::EnrollResponse;
use crate::permissions::{AccessRequest, Action, Denial, policies};

pub async fn enroll(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    let access = AccessRequest::new(&actor, Action::Enroll);
    if let Err(denial) = policies::ENROLLMENT.authorize(&access) {
        return Ok(denial.into_response());
    }
    let Some(user_id) = actor.id() else {
        return Ok(Denial::Unauthenticated.into_response());
    };

    let storage = service.get_storage(request)?;
    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(course_not_found()),
        Err(e) => return Ok(e.to_response()),
    }

    match storage.enroll_student(course_id, user_id).await {
        Ok(added) => {
            if added {
                info!("User {} enrolled in course {}", user_id, course_id);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                EnrollResponse::enrolled(),
                "Enrolled successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}
