use serde::Serialize;

use super::entities::Course;
use crate::models::PaginatedResponse;

// 课程列表响应
pub type CourseListResponse = PaginatedResponse<Course>;

// 选课响应
#[derive(Debug, Clone, Serialize)]
pub struct EnrollResponse {
    pub status: &'static str,
}

impl EnrollResponse {
    pub fn enrolled() -> Self {
        Self { status: "enrolled" }
    }
}
