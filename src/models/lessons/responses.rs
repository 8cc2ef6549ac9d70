use super::entities::Lesson;
use crate::models::PaginatedResponse;

// 课时列表响应
pub type LessonListResponse = PaginatedResponse<Lesson>;
