use serde::Serialize;

// 业务错误码，随响应体中的 code 字段返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    ValidationFailed = 1005,
    Conflict = 1009,
    InternalServerError = 1500,

    // 用户 2xxx
    UserNotFound = 2000,
    UsernameAlreadyExists = 2001,

    // 课程 3xxx
    CourseNotFound = 3000,
    CourseTeacherInvalid = 3001,

    // 课时 4xxx
    LessonNotFound = 4000,

    // 作业 5xxx
    AssignmentNotFound = 5000,

    // 提交 6xxx
    SubmissionNotFound = 6000,
    SubmissionGradeForbidden = 6001,

    // 评价 7xxx
    ReviewNotFound = 7000,
    ReviewRatingInvalid = 7001,
}
