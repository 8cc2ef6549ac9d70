use serde::Deserialize;

use crate::models::ListQuery;
use crate::models::common::serde_helpers::deserialize_lenient_id;
use crate::permissions::RowScope;

// 创建评价请求
//
// course 缺失或无法解析时由权限规则拒绝，而不是返回参数错误；
// rating / comment 在权限检查通过后才校验是否齐全。
// 请求体中的 student 字段会被忽略，评价者始终是当前登录用户。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReviewRequest {
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub course: Option<i64>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub comment: Option<String>,
}

// 完整评价数据（PUT 整体更新，以及校验后的创建数据）
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub course: i64,
    pub rating: i32,
    pub comment: String,
}

// 部分更新评价请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReviewRequest {
    pub course: Option<i64>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

impl From<ReviewRequest> for UpdateReviewRequest {
    fn from(req: ReviewRequest) -> Self {
        Self {
            course: Some(req.course),
            rating: Some(req.rating),
            comment: Some(req.comment),
        }
    }
}

// 评价查询参数（来自HTTP请求）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewQueryParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course: Option<i64>,
}

// 评价列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct ReviewListQuery {
    pub pagination: ListQuery,
    pub course: Option<i64>,
    pub scope: RowScope,
}

impl ReviewListQuery {
    pub fn new(params: ReviewQueryParams, scope: RowScope) -> Self {
        Self {
            pagination: ListQuery {
                page: params.page,
                size: params.size,
            },
            course: params.course,
            scope,
        }
    }
}
