//! 内置权限规则

use super::{AccessRequest, AccessTarget, Action, CourseReference, Permission};

/// 读操作对所有人开放，写操作要求已认证的教师
pub struct TeacherWriteOnly;

impl Permission for TeacherWriteOnly {
    fn name(&self) -> &'static str {
        "TeacherWriteOnly"
    }

    fn has_permission(&self, request: &AccessRequest<'_>) -> bool {
        request.action.is_read_only() || request.actor.is_teacher()
    }
}

/// 教师放行；学生只能操作自己名下的记录
pub struct OwnerOrTeacher;

impl Permission for OwnerOrTeacher {
    fn name(&self) -> &'static str {
        "OwnerOrTeacher"
    }

    fn has_permission(&self, request: &AccessRequest<'_>) -> bool {
        request.actor.is_teacher() || request.actor.is_student()
    }

    fn has_object_permission(
        &self,
        request: &AccessRequest<'_>,
        target: &dyn AccessTarget,
    ) -> bool {
        if request.actor.is_teacher() {
            return true;
        }
        match (request.actor.id(), target.owner_id()) {
            (Some(actor_id), Some(owner_id)) => actor_id == owner_id,
            _ => false,
        }
    }
}

/// 教师放行；学生必须在目标课程的选课名单中
pub struct EnrolledOrTeacher;

impl Permission for EnrolledOrTeacher {
    fn name(&self) -> &'static str {
        "EnrolledOrTeacher"
    }

    fn has_permission(&self, request: &AccessRequest<'_>) -> bool {
        request.actor.is_teacher() || request.actor.is_student()
    }

    fn has_object_permission(
        &self,
        request: &AccessRequest<'_>,
        target: &dyn AccessTarget,
    ) -> bool {
        if request.actor.is_teacher() {
            return true;
        }
        request
            .actor
            .id()
            .is_some_and(|actor_id| target.is_enrolled(actor_id))
    }
}

/// 创建评价时，评价者必须已选修所引用的课程
pub struct CanReviewCourse;

impl Permission for CanReviewCourse {
    fn name(&self) -> &'static str {
        "CanReviewCourse"
    }

    fn has_permission(&self, request: &AccessRequest<'_>) -> bool {
        if request.action != Action::Create {
            return true;
        }
        match (request.course_reference, request.actor.id()) {
            (CourseReference::Resolved(course), Some(actor_id)) => course.has_student(actor_id),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{Actor, UserRole};
    use crate::permissions::tests::{actor, course};

    struct Owned(i64);

    impl AccessTarget for Owned {
        fn owner_id(&self) -> Option<i64> {
            Some(self.0)
        }
    }

    #[test]
    fn test_teacher_write_only() {
        let student = actor(2, UserRole::Student);
        let teacher = actor(1, UserRole::Teacher);

        for action in [Action::List, Action::Retrieve] {
            let request = AccessRequest::new(&Actor::Anonymous, action);
            assert!(TeacherWriteOnly.has_permission(&request));
        }
        assert!(!TeacherWriteOnly.has_permission(&AccessRequest::new(
            &Actor::Anonymous,
            Action::Create
        )));
        assert!(!TeacherWriteOnly.has_permission(&AccessRequest::new(&student, Action::Create)));
        assert!(!TeacherWriteOnly.has_permission(&AccessRequest::new(&student, Action::Destroy)));
        assert!(TeacherWriteOnly.has_permission(&AccessRequest::new(&teacher, Action::Update)));
        assert!(TeacherWriteOnly.has_object_permission(
            &AccessRequest::new(&student, Action::Update),
            &Owned(9)
        ));
    }

    #[test]
    fn test_owner_or_teacher() {
        let owner = actor(2, UserRole::Student);
        let other = actor(3, UserRole::Student);
        let teacher = actor(1, UserRole::Teacher);
        let target = Owned(2);

        assert!(!OwnerOrTeacher.has_permission(&AccessRequest::new(
            &Actor::Anonymous,
            Action::List
        )));
        assert!(OwnerOrTeacher.has_permission(&AccessRequest::new(&other, Action::List)));

        let check = |who: &Actor| {
            OwnerOrTeacher
                .has_object_permission(&AccessRequest::new(who, Action::Retrieve), &target)
        };
        assert!(check(&owner));
        assert!(check(&teacher));
        assert!(!check(&other));
        assert!(!check(&Actor::Anonymous));
    }

    #[test]
    fn test_owner_or_teacher_without_owner() {
        let student = actor(2, UserRole::Student);
        let target = course(1, 1, vec![2]);
        assert!(!OwnerOrTeacher.has_object_permission(
            &AccessRequest::new(&student, Action::Retrieve),
            &target
        ));
    }

    #[test]
    fn test_enrolled_or_teacher() {
        let enrolled = actor(2, UserRole::Student);
        let outsider = actor(3, UserRole::Student);
        let teacher = actor(1, UserRole::Teacher);
        let target = course(10, 1, vec![2, 4]);

        let check = |who: &Actor| {
            EnrolledOrTeacher
                .has_object_permission(&AccessRequest::new(who, Action::Retrieve), &target)
        };
        assert!(check(&enrolled));
        assert!(check(&teacher));
        assert!(!check(&outsider));
        assert!(!EnrolledOrTeacher.has_permission(&AccessRequest::new(
            &Actor::Anonymous,
            Action::List
        )));
    }

    #[test]
    fn test_can_review_course() {
        let enrolled = actor(2, UserRole::Student);
        let outsider = actor(3, UserRole::Student);
        let target = course(10, 1, vec![2]);
        let resolved = CourseReference::Resolved(&target);

        let create = |who, reference| {
            CanReviewCourse.has_permission(
                &AccessRequest::new(who, Action::Create).with_course_reference(reference),
            )
        };
        assert!(create(&enrolled, resolved));
        assert!(!create(&outsider, resolved));
        assert!(!create(&enrolled, CourseReference::Unresolved));
        assert!(!create(&enrolled, CourseReference::Absent));

        // 非创建操作不做选课校验
        for action in [Action::List, Action::Retrieve, Action::Update, Action::Destroy] {
            assert!(CanReviewCourse.has_permission(&AccessRequest::new(&outsider, action)));
        }
    }
}
