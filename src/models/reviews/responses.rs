use super::entities::Review;
use crate::models::PaginatedResponse;

// 评价列表响应
pub type ReviewListResponse = PaginatedResponse<Review>;
