use serde::Deserialize;

use crate::models::ListQuery;

// 创建课程请求（PUT 整体更新同样使用该结构）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub teacher: i64,
    #[serde(default)]
    pub students: Vec<i64>,
}

// 部分更新课程请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub teacher: Option<i64>,
    pub students: Option<Vec<i64>>,
}

impl From<CreateCourseRequest> for UpdateCourseRequest {
    fn from(req: CreateCourseRequest) -> Self {
        Self {
            title: Some(req.title),
            description: Some(req.description),
            teacher: Some(req.teacher),
            students: Some(req.students),
        }
    }
}

// 课程列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher: Option<i64>,
}

impl CourseListQuery {
    pub fn pagination(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            size: self.size,
        }
    }
}
