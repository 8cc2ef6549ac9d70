use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, assignment_not_found};
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::permissions::{AccessRequest, Action, policies};

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) =
        policies::ASSIGNMENTS.authorize(&AccessRequest::new(&actor, Action::Destroy))
    {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    match storage.delete_assignment(assignment_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Assignment deleted successfully",
        ))),
        Ok(false) => Ok(assignment_not_found()),
        Err(e) => Ok(e.to_response()),
    }
}
