use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{LmsError, Result};
use crate::models::users::{entities::User, requests::CreateUserRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let model = ActiveModel {
            username: Set(req.username),
            role: Set(req.role.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                LmsError::conflict("用户名已存在")
            } else {
                LmsError::database_operation(format!("创建用户失败: {e}"))
            }
        })?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 批量获取用户
    pub async fn get_users_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Users::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("批量查询用户失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_user()).collect())
    }

    /// 用户总数
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询用户总数失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::tests::memory_storage;

    fn request(username: &str, role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            role,
        }
    }

    #[actix_web::test]
    async fn test_create_and_find_user() {
        let storage = memory_storage().await;
        let user = storage
            .create_user(request("alice", UserRole::Teacher))
            .await
            .unwrap();

        assert!(user.is_teacher());
        let found = storage.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(storage.count_users().await.unwrap(), 1);
        assert!(storage.get_user_by_id(user.id + 100).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_duplicate_username_is_conflict() {
        let storage = memory_storage().await;
        storage
            .create_user(request("bob", UserRole::Student))
            .await
            .unwrap();
        let err = storage
            .create_user(request("bob", UserRole::Teacher))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    #[actix_web::test]
    async fn test_get_users_by_ids_skips_missing() {
        let storage = memory_storage().await;
        let a = storage.create_user(request("s1", UserRole::Student)).await.unwrap();
        let b = storage.create_user(request("s2", UserRole::Student)).await.unwrap();

        let users = storage.get_users_by_ids(&[a.id, b.id, 999]).await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(storage.get_users_by_ids(&[]).await.unwrap().is_empty());
    }
}
