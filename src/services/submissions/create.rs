use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use tracing::info;

use super::{SubmissionService, ensure_assignment_exists, grade_forbidden};
use crate::middlewares::Authenticate;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::{AccessRequest, Action, Denial, policies};
use crate::services::parse_body;
use crate::utils::validate::validate_file_path;

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    body: Value,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) =
        policies::SUBMISSIONS.authorize(&AccessRequest::new(&actor, Action::Create))
    {
        return Ok(denial.into_response());
    }

    let submission_data: CreateSubmissionRequest = match parse_body(body) {
        Ok(data) => data,
        Err(resp) => return Ok(resp),
    };
    let Some(student_id) = actor.id() else {
        return Ok(Denial::Unauthenticated.into_response());
    };

    if submission_data.grade.is_some() && !actor.is_teacher() {
        return Ok(grade_forbidden());
    }

    if let Err(msg) = validate_file_path(&submission_data.file) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    if let Err(resp) = ensure_assignment_exists(&storage, submission_data.assignment).await {
        return Ok(resp);
    }

    match storage.create_submission(student_id, submission_data).await {
        Ok(submission) => {
            info!(
                "Submission {} created for assignment {} by user {}",
                submission.id, submission.assignment, student_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                "Submission created successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}
