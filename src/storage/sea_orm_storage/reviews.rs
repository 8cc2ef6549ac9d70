//! 课程评价存储操作

use super::{SeaOrmStorage, empty_page};
use crate::entity::course_students::{Column as EnrollmentColumn, Entity as CourseStudents};
use crate::entity::reviews::{ActiveModel, Column, Entity as Reviews};
use crate::errors::{LmsError, Result};
use crate::models::reviews::{
    entities::Review,
    requests::{ReviewListQuery, ReviewRequest, UpdateReviewRequest},
    responses::ReviewListResponse,
};
use crate::permissions::RowScope;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
    Set,
};

impl SeaOrmStorage {
    /// 创建评价
    pub async fn create_review_impl(&self, student_id: i64, req: ReviewRequest) -> Result<Review> {
        let model = ActiveModel {
            course_id: Set(req.course),
            student_id: Set(student_id),
            rating: Set(req.rating),
            comment: Set(req.comment),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建评价失败: {e}")))?;

        Ok(result.into_review())
    }

    /// 通过 ID 获取评价
    pub async fn get_review_by_id_impl(&self, review_id: i64) -> Result<Option<Review>> {
        let result = Reviews::find_by_id(review_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询评价失败: {e}")))?;

        Ok(result.map(|m| m.into_review()))
    }

    /// 分页列出评价
    pub async fn list_reviews_with_pagination_impl(
        &self,
        query: ReviewListQuery,
    ) -> Result<ReviewListResponse> {
        let mut select = Reviews::find();

        // 学生只能看到自己已选课程的评价
        match query.scope {
            RowScope::All => {}
            RowScope::Student(student_id) => {
                let enrolled_courses = CourseStudents::find()
                    .select_only()
                    .column(EnrollmentColumn::CourseId)
                    .filter(EnrollmentColumn::StudentId.eq(student_id))
                    .into_query();
                select = select.filter(Column::CourseId.in_subquery(enrolled_courses));
            }
            RowScope::Nothing => return Ok(empty_page(query.pagination)),
        }

        if let Some(course_id) = query.course {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let (models, pagination) = self
            .fetch_page(select.order_by_asc(Column::Id), query.pagination, "评价")
            .await?;

        Ok(ReviewListResponse {
            items: models.into_iter().map(|m| m.into_review()).collect(),
            pagination,
        })
    }

    /// 更新评价
    pub async fn update_review_impl(
        &self,
        review_id: i64,
        update: UpdateReviewRequest,
    ) -> Result<Option<Review>> {
        let existing = Reviews::find_by_id(review_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询评价失败: {e}")))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(course_id) = update.course {
            model.course_id = Set(course_id);
        }
        if let Some(rating) = update.rating {
            model.rating = Set(rating);
        }
        if let Some(comment) = update.comment {
            model.comment = Set(comment);
        }

        if !model.is_changed() {
            return self.get_review_by_id_impl(review_id).await;
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新评价失败: {e}")))?;

        Ok(Some(result.into_review()))
    }

    /// 删除评价
    pub async fn delete_review_impl(&self, review_id: i64) -> Result<bool> {
        let result = Reviews::delete_by_id(review_id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除评价失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::reviews::requests::{ReviewListQuery, ReviewQueryParams, ReviewRequest};
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::permissions::RowScope;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::tests::memory_storage;

    async fn user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> i64 {
        storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                role,
            })
            .await
            .unwrap()
            .id
    }

    async fn course(storage: &SeaOrmStorage, teacher: i64, students: Vec<i64>) -> i64 {
        storage
            .create_course(CreateCourseRequest {
                title: "课程".to_string(),
                description: String::new(),
                teacher,
                students,
            })
            .await
            .unwrap()
            .id
    }

    #[actix_web::test]
    async fn test_review_list_scoped_to_enrolled_courses() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher", UserRole::Teacher).await;
        let alice = user(&storage, "alice", UserRole::Student).await;
        let bob = user(&storage, "bob", UserRole::Student).await;
        let shared = course(&storage, teacher, vec![alice, bob]).await;
        let bobs_only = course(&storage, teacher, vec![bob]).await;

        for (student, course_id) in [(alice, shared), (bob, shared), (bob, bobs_only)] {
            storage
                .create_review(
                    student,
                    ReviewRequest {
                        course: course_id,
                        rating: 4,
                        comment: "不错".to_string(),
                    },
                )
                .await
                .unwrap();
        }

        let list = |scope| {
            storage.list_reviews_with_pagination(ReviewListQuery::new(
                ReviewQueryParams::default(),
                scope,
            ))
        };

        let for_alice = list(RowScope::Student(alice)).await.unwrap();
        assert_eq!(for_alice.pagination.total, 2);
        assert!(for_alice.items.iter().all(|r| r.course == shared));

        assert_eq!(list(RowScope::Student(bob)).await.unwrap().pagination.total, 3);
        assert_eq!(list(RowScope::All).await.unwrap().pagination.total, 3);
        assert!(list(RowScope::Nothing).await.unwrap().items.is_empty());
    }
}
