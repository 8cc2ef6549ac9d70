use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::models::users::entities::Actor;
use crate::models::users::responses::UserResponse;
use crate::permissions::{AccessRequest, Action, Denial, policies};

pub async fn me(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) = policies::USERS.authorize(&AccessRequest::new(&actor, Action::Retrieve)) {
        return Ok(denial.into_response());
    }

    match actor {
        Actor::User(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse::from(user),
            "User retrieved successfully",
        ))),
        Actor::Anonymous => Ok(Denial::Unauthenticated.into_response()),
    }
}
