//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{LmsError, Result};
use crate::models::assignments::{
    entities::Assignment,
    requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
    responses::AssignmentListResponse,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        let model = ActiveModel {
            lesson_id: Set(req.lesson),
            title: Set(req.title),
            description: Set(req.description),
            deadline: Set(req.deadline.timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let mut select = Assignments::find();

        if let Some(lesson_id) = query.lesson {
            select = select.filter(Column::LessonId.eq(lesson_id));
        }

        let (models, pagination) = self
            .fetch_page(select.order_by_asc(Column::Id), query.pagination(), "作业")
            .await?;

        Ok(AssignmentListResponse {
            items: models.into_iter().map(|m| m.into_assignment()).collect(),
            pagination,
        })
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let existing = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询作业失败: {e}")))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(lesson_id) = update.lesson {
            model.lesson_id = Set(lesson_id);
        }
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(deadline) = update.deadline {
            model.deadline = Set(deadline.timestamp());
        }

        if !model.is_changed() {
            return self.get_assignment_by_id_impl(assignment_id).await;
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(Some(result.into_assignment()))
    }

    /// 删除作业
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(assignment_id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
