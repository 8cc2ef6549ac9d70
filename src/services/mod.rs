pub mod assignments;
pub mod courses;
pub mod lessons;
pub mod reviews;
pub mod submissions;
pub mod users;

pub use assignments::AssignmentService;
pub use courses::CourseService;
pub use lessons::LessonService;
pub use reviews::ReviewService;
pub use submissions::SubmissionService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::errors::LmsError;
use crate::permissions::Action;
use crate::storage::Storage;

// 从 app_data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not found in app data"))
}

/// 解析请求体
///
/// 写操作先以 `serde_json::Value` 接收请求体，权限检查通过后再解析为具体类型，
/// 这样未认证或无权限的请求不会因为请求体格式而得到 400。
pub(crate) fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, HttpResponse> {
    serde_json::from_value(body).map_err(|e| LmsError::from(e).to_response())
}

/// 按 PUT / PATCH 语义解析更新请求体
///
/// PUT 需要完整数据（`Full`），转换为部分更新结构后与 PATCH 共用更新逻辑。
pub(crate) fn parse_update<Full, Partial>(
    action: Action,
    body: Value,
) -> Result<Partial, HttpResponse>
where
    Full: DeserializeOwned + Into<Partial>,
    Partial: DeserializeOwned,
{
    match action {
        Action::Update => parse_body::<Full>(body).map(Into::into),
        _ => parse_body::<Partial>(body),
    }
}
