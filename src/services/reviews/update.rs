use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;

use super::{ReviewService, rating_invalid, review_not_found};
use crate::middlewares::Authenticate;
use crate::models::reviews::requests::{ReviewRequest, UpdateReviewRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::{AccessRequest, Action, policies};
use crate::services::parse_update;
use crate::utils::validate::validate_rating;

pub async fn update_review(
    service: &ReviewService,
    request: &HttpRequest,
    review_id: i64,
    body: Value,
    action: Action,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    let access = AccessRequest::new(&actor, action);
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

    let parsed = parse_update::<ReviewRequest, UpdateReviewRequest>(action, body);
    let update_data = match parsed {
        Ok(data) => data,
        Err(resp) => return Ok(resp),
    };

    if let Some(rating) = update_data.rating
        && let Err(msg) = validate_rating(rating)
    {
        return Ok(rating_invalid(msg));
    }

    if let Some(course_id) = update_data.course
        && course_id != review.course
    {
        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    format!("Course {course_id} does not exist"),
                )));
            }
            Err(e) => return Ok(e.to_response()),
        }
    }

    match storage.update_review(review_id, update_data).await {
        Ok(Some(review)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            review,
            "Review updated successfully",
        ))),
        Ok(None) => Ok(review_not_found()),
        Err(e) => Ok(e.to_response()),
    }
}
