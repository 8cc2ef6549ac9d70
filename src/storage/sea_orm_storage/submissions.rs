//! 作业提交存储操作

use super::{SeaOrmStorage, empty_page};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{LmsError, Result};
use crate::models::submissions::{
    entities::Submission,
    requests::{CreateSubmissionRequest, SubmissionListQuery, UpdateSubmissionRequest},
    responses::SubmissionListResponse,
};
use crate::permissions::RowScope;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let model = ActiveModel {
            assignment_id: Set(req.assignment),
            student_id: Set(student_id),
            file: Set(req.file),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            grade: Set(req.grade),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出提交
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let mut select = Submissions::find();

        // 学生只能看到自己的提交
        match query.scope {
            RowScope::All => {}
            RowScope::Student(student_id) => {
                select = select.filter(Column::StudentId.eq(student_id));
            }
            RowScope::Nothing => return Ok(empty_page(query.pagination)),
        }

        if let Some(assignment_id) = query.assignment {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        let (models, pagination) = self
            .fetch_page(select.order_by_asc(Column::Id), query.pagination, "提交")
            .await?;

        Ok(SubmissionListResponse {
            items: models.into_iter().map(|m| m.into_submission()).collect(),
            pagination,
        })
    }

    /// 更新提交
    pub async fn update_submission_impl(
        &self,
        submission_id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        let existing = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交失败: {e}")))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(assignment_id) = update.assignment {
            model.assignment_id = Set(assignment_id);
        }
        if let Some(file) = update.file {
            model.file = Set(file);
        }
        if let Some(grade) = update.grade {
            model.grade = Set(grade);
        }

        if !model.is_changed() {
            return self.get_submission_by_id_impl(submission_id).await;
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新提交失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }

    /// 删除提交
    pub async fn delete_submission_impl(&self, submission_id: i64) -> Result<bool> {
        let result = Submissions::delete_by_id(submission_id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::lessons::requests::CreateLessonRequest;
    use crate::models::submissions::requests::{
        CreateSubmissionRequest, SubmissionListQuery, SubmissionQueryParams,
    };
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

    async fn assignment(storage: &SeaOrmStorage, teacher: i64) -> (i64, i64) {
        let course = storage
            .create_course(CreateCourseRequest {
                title: "课程".to_string(),
                description: String::new(),
                teacher,
                students: vec![],
            })
            .await
            .unwrap();
        let lesson = storage
            .create_lesson(CreateLessonRequest {
                course: course.id,
                title: "第一课".to_string(),
                content: String::new(),
                file: None,
            })
            .await
            .unwrap();
        let assignment = storage
            .create_assignment(CreateAssignmentRequest {
                lesson: lesson.id,
                title: "练习".to_string(),
                description: String::new(),
                deadline: chrono::Utc::now(),
            })
            .await
            .unwrap();
        (course.id, assignment.id)
    }

    async fn submit(storage: &SeaOrmStorage, student: i64, assignment: i64) {
        storage
            .create_submission(
                student,
                CreateSubmissionRequest {
                    assignment,
                    file: "answer.rs".to_string(),
                    grade: None,
                },
            )
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn test_submission_list_scoped_to_owner() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher", UserRole::Teacher).await;
        let alice = user(&storage, "alice", UserRole::Student).await;
        let bob = user(&storage, "bob", UserRole::Student).await;
        let (course_id, assignment_id) = assignment(&storage, teacher).await;

        for student in [alice, bob, bob] {
            submit(&storage, student, assignment_id).await;
        }

        let list = |scope| {
            storage.list_submissions_with_pagination(SubmissionListQuery::new(
                SubmissionQueryParams::default(),
                scope,
            ))
        };

        let for_bob = list(RowScope::Student(bob)).await.unwrap();
        assert_eq!(for_bob.pagination.total, 2);
        assert!(for_bob.items.iter().all(|s| s.student == bob));
        assert_eq!(list(RowScope::All).await.unwrap().pagination.total, 3);

        // 删除课程会级联删除其下的课时、作业与提交
        assert!(storage.delete_course(course_id).await.unwrap());
        assert_eq!(list(RowScope::All).await.unwrap().pagination.total, 0);
    }

    #[actix_web::test]
    async fn test_page_beyond_last_is_empty() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher", UserRole::Teacher).await;
        let alice = user(&storage, "alice", UserRole::Student).await;
        let (_, assignment_id) = assignment(&storage, teacher).await;
        submit(&storage, alice, assignment_id).await;

        let params = SubmissionQueryParams {
            page: Some(i64::MAX),
            size: Some(100),
            assignment: None,
        };
        let page = storage
            .list_submissions_with_pagination(SubmissionListQuery::new(params, RowScope::All))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.pagination.total_pages, 1);
    }
}
