use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    lessons::{
        entities::Lesson,
        requests::{CreateLessonRequest, LessonListQuery, UpdateLessonRequest},
        responses::LessonListResponse,
    },
    reviews::{
        entities::Review,
        requests::{ReviewListQuery, ReviewRequest, UpdateReviewRequest},
        responses::ReviewListResponse,
    },
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, SubmissionListQuery, UpdateSubmissionRequest},
        responses::SubmissionListResponse,
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 批量获取用户（不存在的 ID 会被忽略）
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程（连同选课名单）
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程信息，提供 students 时整体替换选课名单
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    // 学生选课，返回是否新加入（已在名单中返回 false）
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<bool>;

    /// 课时管理方法
    async fn create_lesson(&self, lesson: CreateLessonRequest) -> Result<Lesson>;
    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>>;
    async fn list_lessons_with_pagination(
        &self,
        query: LessonListQuery,
    ) -> Result<LessonListResponse>;
    async fn update_lesson(
        &self,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>>;
    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool>;

    /// 作业管理方法
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;

    /// 提交管理方法
    // 创建提交，提交者由调用方指定
    async fn create_submission(
        &self,
        student_id: i64,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission>;
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 列出提交（按 query.scope 做行级过滤）
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    async fn update_submission(
        &self,
        submission_id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>>;
    async fn delete_submission(&self, submission_id: i64) -> Result<bool>;

    /// 评价管理方法
    // 创建评价，评价者由调用方指定
    async fn create_review(&self, student_id: i64, review: ReviewRequest) -> Result<Review>;
    async fn get_review_by_id(&self, review_id: i64) -> Result<Option<Review>>;
    // 列出评价（按 query.scope 做行级过滤）
    async fn list_reviews_with_pagination(
        &self,
        query: ReviewListQuery,
    ) -> Result<ReviewListResponse>;
    async fn update_review(
        &self,
        review_id: i64,
        update: UpdateReviewRequest,
    ) -> Result<Option<Review>>;
    async fn delete_review(&self, review_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
