use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserService, user_not_found};
use crate::middlewares::Authenticate;
use crate::models::ApiResponse;
use crate::models::users::responses::UserResponse;
use crate::permissions::{AccessRequest, Action, policies};

pub async fn get_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) = policies::USERS.authorize(&AccessRequest::new(&actor, Action::Retrieve)) {
        return Ok(denial.into_response());
    }

    let storage = service.get_storage(request)?;
    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse::from(user),
            "User retrieved successfully",
        ))),
        Ok(None) => Ok(user_not_found()),
        Err(e) => Ok(e.to_response()),
    }
}
