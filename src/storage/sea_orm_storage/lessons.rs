//! 课时存储操作

use super::SeaOrmStorage;
use crate::entity::lessons::{ActiveModel, Column, Entity as Lessons};
use crate::errors::{LmsError, Result};
use crate::models::lessons::{
    entities::Lesson,
    requests::{CreateLessonRequest, LessonListQuery, UpdateLessonRequest},
    responses::LessonListResponse,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建课时
    pub async fn create_lesson_impl(&self, req: CreateLessonRequest) -> Result<Lesson> {
        let model = ActiveModel {
            course_id: Set(req.course),
            title: Set(req.title),
            content: Set(req.content),
            file: Set(req.file),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建课时失败: {e}")))?;

        Ok(result.into_lesson())
    }

    /// 通过 ID 获取课时
    pub async fn get_lesson_by_id_impl(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    /// 分页列出课时
    pub async fn list_lessons_with_pagination_impl(
        &self,
        query: LessonListQuery,
    ) -> Result<LessonListResponse> {
        let mut select = Lessons::find();

        if let Some(course_id) = query.course {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let (models, pagination) = self
            .fetch_page(select.order_by_asc(Column::Id), query.pagination(), "课时")
            .await?;

        Ok(LessonListResponse {
            items: models.into_iter().map(|m| m.into_lesson()).collect(),
            pagination,
        })
    }

    /// 更新课时
    pub async fn update_lesson_impl(
        &self,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        let existing = Lessons::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询课时失败: {e}")))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(course_id) = update.course {
            model.course_id = Set(course_id);
        }
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(content) = update.content {
            model.content = Set(content);
        }
        if let Some(file) = update.file {
            model.file = Set(file);
        }

        if !model.is_changed() {
            return self.get_lesson_by_id_impl(lesson_id).await;
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新课时失败: {e}")))?;

        Ok(Some(result.into_lesson()))
    }

    /// 删除课时
    pub async fn delete_lesson_impl(&self, lesson_id: i64) -> Result<bool> {
        let result = Lessons::delete_by_id(lesson_id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除课时失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
