use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use tracing::info;

use super::UserService;
use crate::errors::LmsError;
use crate::middlewares::Authenticate;
use crate::models::users::requests::CreateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::permissions::{AccessRequest, Action, policies};
use crate::services::parse_body;
use crate::utils::validate::validate_username;

pub async fn create_user(
    service: &UserService,
    request: &HttpRequest,
    body: Value,
) -> ActixResult<HttpResponse> {
    let actor = Authenticate::extract_actor(request);
    if let Err(denial) = policies::USERS.authorize(&AccessRequest::new(&actor, Action::Create)) {
        return Ok(denial.into_response());
    }

    let user_data: CreateUserRequest = match parse_body(body) {
        Ok(data) => data,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_username(&user_data.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    match storage.create_user(user_data).await {
        Ok(user) => {
            info!("User {} ({}) created as {}", user.id, user.username, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse::from(user),
                "User created successfully",
            )))
        }
        Err(LmsError::Conflict(_)) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UsernameAlreadyExists,
            "Username already exists",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
