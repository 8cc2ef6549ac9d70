use serde::Deserialize;

use crate::models::ListQuery;
use crate::models::common::serde_helpers::deserialize_some;

// 创建课时请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLessonRequest {
    pub course: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub file: Option<String>,
}

// 部分更新课时请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLessonRequest {
    pub course: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    // None: 不修改；Some(None): 清空附件
    #[serde(default, deserialize_with = "deserialize_some")]
    pub file: Option<Option<String>>,
}

impl From<CreateLessonRequest> for UpdateLessonRequest {
    fn from(req: CreateLessonRequest) -> Self {
        Self {
            course: Some(req.course),
            title: Some(req.title),
            content: Some(req.content),
            file: Some(req.file),
        }
    }
}

// 课时列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LessonListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course: Option<i64>,
}

impl LessonListQuery {
    pub fn pagination(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            size: self.size,
        }
    }
}
