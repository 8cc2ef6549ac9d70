use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use tracing::info;

use super::{AssignmentService, ensure_lesson_exists};
use crate::middlewares::Authenticate;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::{AccessRequest, Action, policies};
use crate::services::parse_body;
use crate::utils::validate::validate_title;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    body: Value,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) =
        policies::ASSIGNMENTS.authorize(&AccessRequest::new(&actor, Action::Create))
    {
        return Ok(denial.into_response());
    }

    let assignment_data: CreateAssignmentRequest = match parse_body(body) {
        Ok(data) => data,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_title(&assignment_data.title) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    if let Err(resp) = ensure_lesson_exists(&storage, assignment_data.lesson).await {
        return Ok(resp);
    }

    match storage.create_assignment(assignment_data).await {
        Ok(assignment) => {
            info!(
                "Assignment {} created in lesson {}",
                assignment.id, assignment.lesson
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}
