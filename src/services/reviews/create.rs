use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use tracing::info;

use super::{ReviewService, rating_invalid};
use crate::middlewares::Authenticate;
use crate::models::common::serde_helpers::lenient_id;
use crate::models::reviews::requests::{CreateReviewRequest, ReviewRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::{AccessRequest, Action, CourseReference, Denial, policies};
use crate::services::parse_body;
use crate::utils::validate::validate_rating;

pub async fn create_review(
    service: &ReviewService,
    request: &HttpRequest,
    body: Value,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    let storage = service.get_storage(request)?;

    // 规则执行前先解析被评价的课程，其余字段在放行后再解析
    let referenced = match lenient_id(&body["course"]) {
        Some(course_id) => match storage.get_course_by_id(course_id).await {
            Ok(found) => Some(found),
            Err(e) => return Ok(e.to_response()),
        },
        None => None,
    };
    let reference = match &referenced {
        None => CourseReference::Absent,
        Some(None) => CourseReference::Unresolved,
        Some(Some(course)) => CourseReference::Resolved(course),
    };

    let access = AccessRequest::new(&actor, Action::Create).with_course_reference(reference);
    if let Err(denial) = policies::REVIEWS.authorize(&access) {
        return Ok(denial.into_response());
    }
    let (Some(student_id), CourseReference::Resolved(course)) = (actor.id(), reference) else {
        return Ok(Denial::Forbidden.into_response());
    };

    let review_data: CreateReviewRequest = match parse_body(body) {
        Ok(data) => data,
        Err(resp) => return Ok(resp),
    };
    let (Some(rating), Some(comment)) = (review_data.rating, review_data.comment) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Both rating and comment are required",
        )));
    };
    if let Err(msg) = validate_rating(rating) {
        return Ok(rating_invalid(msg));
    }

    let review = ReviewRequest {
        course: course.id,
        rating,
        comment,
    };
    match storage.create_review(student_id, review).await {
        Ok(review) => {
            info!(
                "Review {} created for course {} by user {}",
                review.id, review.course, student_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                review,
                "Review created successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}
