use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReviewService, review_not_found};
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::permissions::{AccessRequest, Action, policies};

pub async fn delete_review(
    service: &ReviewService,
    request: &HttpRequest,
    review_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    let access = AccessRequest::new(&actor, Action::Destroy);
    if let Err(denial) = policies::REVIEWS.authorize(&access) {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    let review = match storage.get_review_by_id(review_id).await {
        Ok(Some(review)) => review,
        Ok(None) => return Ok(review_not_found()),
        Err(e) => return Ok(e.to_response()),
    };

    if let Err(denial) = policies::REVIEWS.authorize_object(&access, &review) {
        return Ok(denial.into_response());
    }

    match storage.delete_review(review_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Review deleted successfully",
        ))),
        Ok(false) => Ok(review_not_found()),
        Err(e) => Ok(e.to_response()),
    }
}
