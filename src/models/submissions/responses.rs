use super::entities::Submission;
use crate::models::PaginatedResponse;

// 提交列表响应
pub type SubmissionListResponse = PaginatedResponse<Submission>;
