//! 课程与选课存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::course_students::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn, Entity as CourseStudents,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{LmsError, Result};
use crate::models::courses::{
    entities::Course,
    requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    responses::CourseListResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

// 选课名单按集合语义去重
fn normalize_students(mut students: Vec<i64>) -> Vec<i64> {
    students.sort_unstable();
    students.dedup();
    students
}

async fn insert_enrollments<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
    students: &[i64],
) -> Result<()> {
    if students.is_empty() {
        return Ok(());
    }

    let now = chrono::Utc::now().timestamp();
    let models = students.iter().map(|&student_id| EnrollmentActiveModel {
        course_id: Set(course_id),
        student_id: Set(student_id),
        enrolled_at: Set(now),
        ..Default::default()
    });

    CourseStudents::insert_many(models)
        .exec(conn)
        .await
        .map_err(|e| LmsError::database_operation(format!("写入选课名单失败: {e}")))?;

    Ok(())
}

impl SeaOrmStorage {
    /// 查询若干课程的选课名单
    async fn load_students(&self, course_ids: &[i64]) -> Result<HashMap<i64, Vec<i64>>> {
        let mut students: HashMap<i64, Vec<i64>> = HashMap::new();
        if course_ids.is_empty() {
            return Ok(students);
        }

        let rows = CourseStudents::find()
            .filter(EnrollmentColumn::CourseId.is_in(course_ids.iter().copied()))
            .order_by_asc(EnrollmentColumn::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询选课名单失败: {e}")))?;

        for row in rows {
            students.entry(row.course_id).or_default().push(row.student_id);
        }

        Ok(students)
    }

    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let students = normalize_students(req.students);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LmsError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            teacher_id: Set(req.teacher),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let course = model
            .insert(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建课程失败: {e}")))?;

        insert_enrollments(&txn, course.id, &students).await?;

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(course.into_course(students))
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询课程失败: {e}")))?;

        let Some(model) = result else {
            return Ok(None);
        };

        let mut students = self.load_students(&[model.id]).await?;
        let students = students.remove(&model.id).unwrap_or_default();
        Ok(Some(model.into_course(students)))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let mut select = Courses::find();

        // 教师筛选
        if let Some(teacher_id) = query.teacher {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let (models, pagination) = self
            .fetch_page(select.order_by_asc(Column::Id), query.pagination(), "课程")
            .await?;

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut students = self.load_students(&ids).await?;

        Ok(CourseListResponse {
            items: models
                .into_iter()
                .map(|m| {
                    let enrolled = students.remove(&m.id).unwrap_or_default();
                    m.into_course(enrolled)
                })
                .collect(),
            pagination,
        })
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        // 先检查课程是否存在
        let existing = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询课程失败: {e}")))?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LmsError::database_operation(format!("开启事务失败: {e}")))?;

        let mut model: ActiveModel = existing.into();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(teacher) = update.teacher {
            model.teacher_id = Set(teacher);
        }

        if model.is_changed() {
            model
                .update(&txn)
                .await
                .map_err(|e| LmsError::database_operation(format!("更新课程失败: {e}")))?;
        }

        // 整体替换选课名单
        if let Some(students) = update.students {
            CourseStudents::delete_many()
                .filter(EnrollmentColumn::CourseId.eq(course_id))
                .exec(&txn)
                .await
                .map_err(|e| LmsError::database_operation(format!("清空选课名单失败: {e}")))?;
            insert_enrollments(&txn, course_id, &normalize_students(students)).await?;
        }

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生选课
    pub async fn enroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let existing = CourseStudents::find()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询选课记录失败: {e}")))?;

        if existing.is_some() {
            return Ok(false);
        }

        let model = EnrollmentActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(_) => Ok(true),
            // 并发重复选课由唯一索引兜底
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(LmsError::database_operation(format!("选课失败: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::courses::requests::{
        CourseListQuery, CreateCourseRequest, UpdateCourseRequest,
    };
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
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

    fn course(teacher: i64, students: Vec<i64>) -> CreateCourseRequest {
        CreateCourseRequest {
            title: "Rust 入门".to_string(),
            description: "所有权与借用".to_string(),
            teacher,
            students,
        }
    }

    #[actix_web::test]
    async fn test_create_course_with_students() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher", UserRole::Teacher).await;
        let s1 = user(&storage, "s1", UserRole::Student).await;
        let s2 = user(&storage, "s2", UserRole::Student).await;

        let created = storage
            .create_course(course(teacher, vec![s2, s1, s2]))
            .await
            .unwrap();
        assert_eq!(created.students, vec![s1, s2]);

        let fetched = storage.get_course_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.students, vec![s1, s2]);
        assert_eq!(fetched.teacher, teacher);
    }

    #[actix_web::test]
    async fn test_enroll_is_idempotent() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher", UserRole::Teacher).await;
        let student = user(&storage, "student", UserRole::Student).await;
        let created = storage.create_course(course(teacher, vec![])).await.unwrap();

        assert!(storage.enroll_student(created.id, student).await.unwrap());
        assert!(!storage.enroll_student(created.id, student).await.unwrap());

        let fetched = storage.get_course_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.students, vec![student]);
    }

    #[actix_web::test]
    async fn test_update_replaces_students() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher", UserRole::Teacher).await;
        let s1 = user(&storage, "s1", UserRole::Student).await;
        let s2 = user(&storage, "s2", UserRole::Student).await;
        let created = storage.create_course(course(teacher, vec![s1])).await.unwrap();

        let updated = storage
            .update_course(
                created.id,
                UpdateCourseRequest {
                    title: Some("Rust 进阶".to_string()),
                    students: Some(vec![s2]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Rust 进阶");
        assert_eq!(updated.students, vec![s2]);

        // 未提供 students 时保留原名单
        let updated = storage
            .update_course(
                created.id,
                UpdateCourseRequest {
                    description: Some("trait 与泛型".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.students, vec![s2]);

        assert!(
            storage
                .update_course(created.id + 100, UpdateCourseRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn test_list_and_delete_courses() {
        let storage = memory_storage().await;
        let t1 = user(&storage, "t1", UserRole::Teacher).await;
        let t2 = user(&storage, "t2", UserRole::Teacher).await;
        let student = user(&storage, "student", UserRole::Student).await;
        let first = storage.create_course(course(t1, vec![student])).await.unwrap();
        storage.create_course(course(t2, vec![])).await.unwrap();

        let page = storage
            .list_courses_with_pagination(CourseListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.items[0].id, first.id);
        assert_eq!(page.items[0].students, vec![student]);

        let filtered = storage
            .list_courses_with_pagination(CourseListQuery {
                teacher: Some(t2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(filtered.items.len(), 1);

        assert!(storage.delete_course(first.id).await.unwrap());
        assert!(!storage.delete_course(first.id).await.unwrap());
        assert!(storage.get_course_by_id(first.id).await.unwrap().is_none());
    }
}
