//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod courses;
mod lessons;
mod reviews;
mod submissions;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{LmsError, Result};
use crate::models::{ListQuery, PaginatedResponse, PaginationInfo};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Select,
    SqlErr,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LmsError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LmsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let mut pool = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.timeout))
            .test_before_acquire(true);

        if in_memory {
            // 内存库随最后一个连接关闭而消失，固定保留单个连接
            pool = pool
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            opt = opt
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("wal_autocheckpoint", "1000");
            pool = pool
                .max_connections(config.pool_size.max(1))
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300));
        }

        let pool = pool
            .connect_with(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LmsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 分页查询，调用方负责排序
    pub(crate) async fn fetch_page<E>(
        &self,
        select: Select<E>,
        query: ListQuery,
        what: &str,
    ) -> Result<(Vec<E::Model>, PaginationInfo)>
    where
        E: EntityTrait,
        E::Model: Sync,
    {
        let page = query.page();
        let size = query.size();

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("查询{what}总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LmsError::database_operation(format!("查询{what}页数失败: {e}")))?;
        let models = if page > pages {
            Vec::new()
        } else {
            paginator
                .fetch_page(page - 1)
                .await
                .map_err(|e| LmsError::database_operation(format!("查询{what}列表失败: {e}")))?
        };

        Ok((
            models,
            PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        ))
    }
}

/// 行级范围为空时直接返回空页
pub(crate) fn empty_page<T>(query: ListQuery) -> PaginatedResponse<T> {
    PaginatedResponse {
        items: Vec::new(),
        pagination: PaginationInfo {
            page: query.page() as i64,
            page_size: query.size() as i64,
            total: 0,
            total_pages: 0,
        },
    }
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.enroll_student_impl(course_id, student_id).await
    }

    // 课时模块
    async fn create_lesson(&self, lesson: CreateLessonRequest) -> Result<Lesson> {
        self.create_lesson_impl(lesson).await
    }

    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_by_id_impl(lesson_id).await
    }

    async fn list_lessons_with_pagination(
        &self,
        query: LessonListQuery,
    ) -> Result<LessonListResponse> {
        self.list_lessons_with_pagination_impl(query).await
    }

    async fn update_lesson(
        &self,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        self.update_lesson_impl(lesson_id, update).await
    }

    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool> {
        self.delete_lesson_impl(lesson_id).await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        student_id: i64,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.create_submission_impl(student_id, submission).await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn update_submission(
        &self,
        submission_id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        self.update_submission_impl(submission_id, update).await
    }

    async fn delete_submission(&self, submission_id: i64) -> Result<bool> {
        self.delete_submission_impl(submission_id).await
    }

    // 评价模块
    async fn create_review(&self, student_id: i64, review: ReviewRequest) -> Result<Review> {
        self.create_review_impl(student_id, review).await
    }

    async fn get_review_by_id(&self, review_id: i64) -> Result<Option<Review>> {
        self.get_review_by_id_impl(review_id).await
    }

    async fn list_reviews_with_pagination(
        &self,
        query: ReviewListQuery,
    ) -> Result<ReviewListResponse> {
        self.list_reviews_with_pagination_impl(query).await
    }

    async fn update_review(
        &self,
        review_id: i64,
        update: UpdateReviewRequest,
    ) -> Result<Option<Review>> {
        self.update_review_impl(review_id, update).await
    }

    async fn delete_review(&self, review_id: i64) -> Result<bool> {
        self.delete_review_impl(review_id).await
    }
}
