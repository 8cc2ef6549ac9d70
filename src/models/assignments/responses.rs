use super::entities::Assignment;
use crate::models::PaginatedResponse;

// 作业列表响应
pub type AssignmentListResponse = PaginatedResponse<Assignment>;
