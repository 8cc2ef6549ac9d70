use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;

use super::{SubmissionService, ensure_assignment_exists, grade_forbidden, submission_not_found};
use crate::middlewares::Authenticate;
use crate::models::submissions::requests::{CreateSubmissionRequest, UpdateSubmissionRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::{AccessRequest, Action, policies};
use crate::services::parse_update;
use crate::utils::validate::validate_file_path;

pub async fn update_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    body: Value,
    action: Action,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    let access = AccessRequest::new(&actor, action);
    if let Err(denial) = policies::SUBMISSIONS.authorize(&access) {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => return Ok(submission_not_found()),
        Err(e) => return Ok(e.to_response()),
    };

    if let Err(denial) = policies::SUBMISSIONS.authorize_object(&access, &submission) {
        return Ok(denial.into_response());
    }

    let parsed = parse_update::<CreateSubmissionRequest, UpdateSubmissionRequest>(action, body);
    let update_data = match parsed {
        Ok(data) => data,
        Err(resp) => return Ok(resp),
    };

    if update_data.grade.is_some() && !actor.is_teacher() {
        return Ok(grade_forbidden());
    }

    if let Some(file) = &update_data.file
        && let Err(msg) = validate_file_path(file)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    if let Some(assignment_id) = update_data.assignment
        && assignment_id != submission.assignment
        && let Err(resp) = ensure_assignment_exists(&storage, assignment_id).await
    {
        return Ok(resp);
    }

    match storage.update_submission(submission_id, update_data).await {
        Ok(Some(submission)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submission,
            "Submission updated successfully",
        ))),
        Ok(None) => Ok(submission_not_found()),
        Err(e) => Ok(e.to_response()),
    }
}
