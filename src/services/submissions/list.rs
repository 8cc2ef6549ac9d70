use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::models::submissions::requests::{SubmissionListQuery, SubmissionQueryParams};
use crate::permissions::{AccessRequest, Action, RowScope, policies};

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    params: SubmissionQueryParams,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) =
        policies::SUBMISSIONS.authorize(&AccessRequest::new(&actor, Action::List))
    {
        return Ok(denial.into_response());
    }

    let query = SubmissionListQuery::new(params, RowScope::for_actor(&actor));
    let storage = service.get_storage(request)?;
    match storage.list_submissions_with_pagination(query).await {
        Ok(submissions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submissions,
            "Submissions retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
