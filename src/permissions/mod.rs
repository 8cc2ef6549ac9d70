//! 访问控制
//!
//! 权限在两个粒度上判定：
//! - 请求级：尚未加载具体对象，例如“能否列出 / 创建”
//! - 对象级：已加载目标对象，例如“能否查看这门课程”
//!
//! 每条规则都是无副作用的布尔判定，由 [`Policy`] 按顺序组合，全部通过才放行。
//! 规则需要的存储数据（例如评价所引用的课程）由服务层预先查出，通过 [`AccessRequest`] 传入。

mod rules;
mod scope;

pub use rules::{CanReviewCourse, EnrolledOrTeacher, OwnerOrTeacher, TeacherWriteOnly};
pub use scope::RowScope;

use actix_web::HttpResponse;
use tracing::info;

use crate::models::courses::entities::Course;
use crate::models::reviews::entities::Review;
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};

/// 资源端点上的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
    Enroll,
}

impl Action {
    /// 只读操作（GET）
    pub fn is_read_only(self) -> bool {
        matches!(self, Action::List | Action::Retrieve)
    }
}

/// 请求体中引用的课程，在规则执行前由服务层解析
#[derive(Debug, Clone, Copy)]
pub enum CourseReference<'a> {
    /// 请求体未携带课程 ID（或无法解析）
    Absent,
    /// 携带了课程 ID，但课程不存在
    Unresolved,
    Resolved(&'a Course),
}

/// 一次权限判定的上下文
#[derive(Debug, Clone, Copy)]
pub struct AccessRequest<'a> {
    pub actor: &'a Actor,
    pub action: Action,
    pub course_reference: CourseReference<'a>,
}

impl<'a> AccessRequest<'a> {
    pub fn new(actor: &'a Actor, action: Action) -> Self {
        Self {
            actor,
            action,
            course_reference: CourseReference::Absent,
        }
    }

    pub fn with_course_reference(mut self, reference: CourseReference<'a>) -> Self {
        self.course_reference = reference;
        self
    }
}

/// 对象级判定所需的目标信息
pub trait AccessTarget {
    /// 记录归属的用户
    fn owner_id(&self) -> Option<i64> {
        None
    }

    /// 用户是否在该对象的选课名单中
    fn is_enrolled(&self, _user_id: i64) -> bool {
        false
    }
}

impl AccessTarget for Course {
    fn is_enrolled(&self, user_id: i64) -> bool {
        self.has_student(user_id)
    }
}

impl AccessTarget for Submission {
    fn owner_id(&self) -> Option<i64> {
        Some(self.student)
    }
}

impl AccessTarget for Review {
    fn owner_id(&self) -> Option<i64> {
        Some(self.student)
    }
}

/// 单条权限规则
pub trait Permission: Send + Sync {
    /// 规则名称，用于日志
    fn name(&self) -> &'static str;

    /// 请求级判定
    fn has_permission(&self, request: &AccessRequest<'_>) -> bool;

    /// 对象级判定，默认放行
    fn has_object_permission(
        &self,
        _request: &AccessRequest<'_>,
        _target: &dyn AccessTarget,
    ) -> bool {
        true
    }
}

/// 拒绝原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// 未认证（401）
    Unauthenticated,
    /// 已认证但无权限（403）
    Forbidden,
}

impl Denial {
    fn for_actor(actor: &Actor) -> Self {
        if actor.is_authenticated() {
            Denial::Forbidden
        } else {
            Denial::Unauthenticated
        }
    }

    pub fn into_response(self) -> HttpResponse {
        match self {
            Denial::Unauthenticated => HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication credentials were not provided",
            )),
            Denial::Forbidden => HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "You do not have permission to perform this action",
            )),
        }
    }
}

/// 有序的规则组合，全部通过才放行
#[derive(Clone, Copy)]
pub struct Policy {
    rules: &'static [&'static dyn Permission],
}

impl Policy {
    pub const fn new(rules: &'static [&'static dyn Permission]) -> Self {
        Self { rules }
    }

    /// 请求级判定
    pub fn authorize(&self, request: &AccessRequest<'_>) -> Result<(), Denial> {
        match self.rules.iter().find(|rule| !rule.has_permission(request)) {
            Some(rule) => Err(deny(rule.name(), request)),
            None => Ok(()),
        }
    }

    /// 对象级判定
    pub fn authorize_object(
        &self,
        request: &AccessRequest<'_>,
        target: &dyn AccessTarget,
    ) -> Result<(), Denial> {
        match self
            .rules
            .iter()
            .find(|rule| !rule.has_object_permission(request, target))
        {
            Some(rule) => Err(deny(rule.name(), request)),
            None => Ok(()),
        }
    }
}

fn deny(rule: &str, request: &AccessRequest<'_>) -> Denial {
    info!(
        "Access denied by {} for actor {:?} on {:?}",
        rule,
        request.actor.id(),
        request.action
    );
    Denial::for_actor(request.actor)
}

/// 各资源端点的权限组合
pub mod policies {
    use super::*;

    pub const COURSES: Policy = Policy::new(&[&TeacherWriteOnly, &EnrolledOrTeacher]);
    // 选课只做请求级的角色校验：对未选课学生，对象级的选课检查恒为拒绝
    pub const ENROLLMENT: Policy = Policy::new(&[&EnrolledOrTeacher]);
    pub const LESSONS: Policy = Policy::new(&[&TeacherWriteOnly]);
    pub const ASSIGNMENTS: Policy = Policy::new(&[&TeacherWriteOnly]);
    pub const SUBMISSIONS: Policy = Policy::new(&[&OwnerOrTeacher]);
    pub const REVIEWS: Policy = Policy::new(&[&OwnerOrTeacher, &CanReviewCourse]);
    pub const USERS: Policy = Policy::new(&[&TeacherWriteOnly, &OwnerOrTeacher]);
}
