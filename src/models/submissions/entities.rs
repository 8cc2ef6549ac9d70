use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    // 作业ID
    pub assignment: i64,
    // 提交学生ID
    pub student: i64,
    // 提交文件路径
    pub file: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    // 评分（未批改时为空）
    pub grade: Option<i32>,
}
