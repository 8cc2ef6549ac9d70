use crate::models::users::entities::Actor;

/// 列表查询的行级过滤范围，由存储层转换为查询条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowScope {
    /// 不过滤
    All,
    /// 仅与该学生相关的记录
    Student(i64),
    /// 空结果
    Nothing,
}

impl RowScope {
    pub fn for_actor(actor: &Actor) -> Self {
        match actor.user() {
            Some(user) if user.is_teacher() => RowScope::All,
            Some(user) => RowScope::Student(user.id),
            None => RowScope::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::permissions::tests::actor;

    #[test]
    fn test_scope_for_actor() {
        assert_eq!(RowScope::for_actor(&actor(1, UserRole::Teacher)), RowScope::All);
        assert_eq!(
            RowScope::for_actor(&actor(7, UserRole::Student)),
            RowScope::Student(7)
        );
        assert_eq!(RowScope::for_actor(&Actor::Anonymous), RowScope::Nothing);
    }
}
