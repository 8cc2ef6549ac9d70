use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    // 所属课程ID
    pub course: i64,
    pub title: String,
    pub content: String,
    // 课时资料文件路径
    pub file: Option<String>,
}
