use serde::Deserialize;

use crate::models::ListQuery;

// 创建作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub lesson: i64,
    pub title: String,
    pub description: String,
    pub deadline: chrono::DateTime<chrono::Utc>,
}

// 部分更新作业请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub lesson: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<CreateAssignmentRequest> for UpdateAssignmentRequest {
    fn from(req: CreateAssignmentRequest) -> Self {
        Self {
            lesson: Some(req.lesson),
            title: Some(req.title),
            description: Some(req.description),
            deadline: Some(req.deadline),
        }
    }
}

// 作业列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub lesson: Option<i64>,
}

impl AssignmentListQuery {
    pub fn pagination(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            size: self.size,
        }
    }
}
