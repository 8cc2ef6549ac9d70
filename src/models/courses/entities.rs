use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 课程名称
    pub title: String,
    // 课程描述
    pub description: String,
    // 授课教师ID
    pub teacher: i64,
    // 已选课学生ID列表
    pub students: Vec<i64>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    pub fn has_student(&self, user_id: i64) -> bool {
        self.students.contains(&user_id)
    }
}
