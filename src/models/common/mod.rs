pub mod error_code;
pub mod pagination;
pub mod response;
pub mod serde_helpers;

pub use error_code::ErrorCode;
pub use pagination::{ListQuery, PaginatedResponse, PaginationInfo};
pub use response::ApiResponse;
