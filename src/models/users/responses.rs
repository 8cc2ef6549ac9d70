use serde::Serialize;

use super::entities::{User, UserRole};

// 用户响应，保留 is_teacher / is_student 两个派生标记
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
    pub is_teacher: bool,
    pub is_student: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            is_teacher: user.is_teacher(),
            is_student: user.is_student(),
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
