use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReviewService;
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::models::reviews::requests::{ReviewListQuery, ReviewQueryParams};
use crate::permissions::{AccessRequest, Action, RowScope, policies};

pub async fn list_reviews(
    service: &ReviewService,
    request: &HttpRequest,
    params: ReviewQueryParams,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) = policies::REVIEWS.authorize(&AccessRequest::new(&actor, Action::List)) {
        return Ok(denial.into_response());
    }

    let query = ReviewListQuery::new(params, RowScope::for_actor(&actor));
    let storage = service.get_storage(request)?;
    match storage.list_reviews_with_pagination(query).await {
        Ok(reviews) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            reviews,
            "Reviews retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
