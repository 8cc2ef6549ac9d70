use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::models::assignments::requests::AssignmentListQuery;
use crate::permissions::{AccessRequest, Action, policies};

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListQuery,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) = policies::ASSIGNMENTS.authorize(&AccessRequest::new(&actor, Action::List))
    {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    match storage.list_assignments_with_pagination(query).await {
        Ok(assignments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignments,
            "Assignments retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
