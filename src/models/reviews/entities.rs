use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    // 被评价课程ID
    pub course: i64,
    // 评价学生ID
    pub student: i64,
    // 评分 1-5
    pub rating: i32,
    pub comment: String,
}
