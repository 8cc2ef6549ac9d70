pub mod authenticate;

pub use authenticate::Authenticate;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::models::{ApiResponse, ErrorCode};

// 辅助函数：创建统一格式的错误响应
pub fn create_error_response(status: StatusCode, code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}
