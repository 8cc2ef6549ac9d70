use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    // 所属课时ID
    pub lesson: i64,
    pub title: String,
    pub description: String,
    // 截止时间
    pub deadline: chrono::DateTime<chrono::Utc>,
}
