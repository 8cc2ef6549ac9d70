use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;

use super::{AssignmentService, assignment_not_found, ensure_lesson_exists};
use crate::middlewares::Authenticate;
use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::{AccessRequest, Action, policies};
use crate::services::parse_update;
use crate::utils::validate::validate_title;

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    body: Value,
    action: Action,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) = policies::ASSIGNMENTS.authorize(&AccessRequest::new(&actor, action)) {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(assignment_not_found()),
        Err(e) => return Ok(e.to_response()),
    }

    let parsed = parse_update::<CreateAssignmentRequest, UpdateAssignmentRequest>(action, body);
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

    if let Some(lesson_id) = update_data.lesson
        && let Err(resp) = ensure_lesson_exists(&storage, lesson_id).await
    {
        return Ok(resp);
    }

    match storage.update_assignment(assignment_id, update_data).await {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment updated successfully",
        ))),
        Ok(None) => Ok(assignment_not_found()),
        Err(e) => Ok(e.to_response()),
    }
}
