pub mod assignments;
pub mod common;
pub mod courses;
pub mod lessons;
pub mod reviews;
pub mod submissions;
pub mod users;

pub use common::{ApiResponse, ErrorCode, ListQuery, PaginatedResponse, PaginationInfo};

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
