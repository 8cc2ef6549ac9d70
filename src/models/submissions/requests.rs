use serde::Deserialize;

use crate::models::ListQuery;
use crate::models::common::serde_helpers::deserialize_some;
use crate::permissions::RowScope;

// 创建提交请求（PUT 整体更新同样使用该结构）
//
// 请求体中的 student 字段会被忽略，提交者始终是当前登录用户。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    pub assignment: i64,
    pub file: String,
    #[serde(default)]
    pub grade: Option<i32>,
}

// 部分更新提交请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubmissionRequest {
    pub assignment: Option<i64>,
    pub file: Option<String>,
    // None: 不修改；Some(None): 清除评分
    #[serde(default, deserialize_with = "deserialize_some")]
    pub grade: Option<Option<i32>>,
}

impl From<CreateSubmissionRequest> for UpdateSubmissionRequest {
    fn from(req: CreateSubmissionRequest) -> Self {
        Self {
            assignment: Some(req.assignment),
            file: Some(req.file),
            grade: req.grade.map(Some),
        }
    }
}

// 提交查询参数（来自HTTP请求）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionQueryParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment: Option<i64>,
}

// 提交列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct SubmissionListQuery {
    pub pagination: ListQuery,
    pub assignment: Option<i64>,
    pub scope: RowScope,
}

impl SubmissionListQuery {
    pub fn new(params: SubmissionQueryParams, scope: RowScope) -> Self {
        Self {
            pagination: ListQuery {
                page: params.page,
                size: params.size,
            },
            assignment: params.assignment,
            scope,
        }
    }
}
