use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, submission_not_found};
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::permissions::{AccessRequest, Action, policies};

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    let access = AccessRequest::new(&actor, Action::Retrieve);
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

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        submission,
        "Submission retrieved successfully",
    )))
}
