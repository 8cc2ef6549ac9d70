use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, assignment_not_found};
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::permissions::{AccessRequest, Action, policies};

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) =
        policies::ASSIGNMENTS.authorize(&AccessRequest::new(&actor, Action::Retrieve))
    {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment retrieved successfully",
        ))),
        Ok(None) => Ok(assignment_not_found()),
        Err(e) => Ok(e.to_response()),
    }
}
