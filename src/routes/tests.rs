use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use std::sync::Arc;

use super::configure_api_routes;
use crate::cache::ObjectCache;
use crate::cache::object_cache::moka::MokaCacheWrapper;
use crate::config::CacheConfig;
use crate::middlewares::Authenticate;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::lessons::requests::CreateLessonRequest;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::storage::sea_orm_storage::tests::memory_storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::{json_error_handler, query_error_handler};

struct Fixture {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    teacher: User,
    enrolled: User,
    outsider: User,
    course_id: i64,
    assignment_id: i64,
}

macro_rules! init_app {
    ($fixture:expr) => {
        test::init_service(
            App::new()
                .wrap(Authenticate)
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($fixture.storage.clone()))
                .app_data(web::Data::new($fixture.cache.clone()))
                .configure(configure_api_routes),
        )
        .await
    };
}

async fn create_user(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            role,
        })
        .await
        .unwrap()
}

async fn fixture() -> Fixture {
    let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
    let cache: Arc<dyn ObjectCache> =
        Arc::new(MokaCacheWrapper::with_config(&CacheConfig::default()).unwrap());

    let teacher = create_user(&storage, "teacher", UserRole::Teacher).await;
    let enrolled = create_user(&storage, "alice", UserRole::Student).await;
    let outsider = create_user(&storage, "bob", UserRole::Student).await;

    let course = storage
        .create_course(CreateCourseRequest {
            title: "Rust 101".to_string(),
            description: "Ownership and borrowing".to_string(),
            teacher: teacher.id,
            students: vec![enrolled.id],
        })
        .await
        .unwrap();
    let lesson = storage
        .create_lesson(CreateLessonRequest {
            course: course.id,
            title: "Intro".to_string(),
            content: "Hello".to_string(),
            file: None,
        })
        .await
        .unwrap();
    let assignment = storage
        .create_assignment(CreateAssignmentRequest {
            lesson: lesson.id,
            title: "Exercise 1".to_string(),
            description: "Write a parser".to_string(),
            deadline: chrono::Utc::now() + chrono::Duration::days(7),
        })
        .await
        .unwrap();

    Fixture {
        storage,
        cache,
        teacher,
        enrolled,
        outsider,
        course_id: course.id,
        assignment_id: assignment.id,
    }
}

fn bearer(user: &User) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user.id, &user.role.to_string()).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_course_detail_requires_enrollment() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let uri = format!("/api/courses/{}/", fx.course_id);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&fx.outsider))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    for user in [&fx.enrolled, &fx.teacher] {
        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(user))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_submission_list_is_scoped_to_owner() {
    let fx = fixture().await;
    let app = init_app!(fx);

    for user in [&fx.enrolled, &fx.outsider] {
        let req = test::TestRequest::post()
            .uri("/api/submissions/")
            .insert_header(bearer(user))
            .set_json(json!({"assignment": fx.assignment_id, "file": "work.zip"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/submissions/")
        .insert_header(bearer(&fx.enrolled))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["student"], json!(fx.enrolled.id));

    let req = test::TestRequest::get()
        .uri("/api/submissions/")
        .insert_header(bearer(&fx.teacher))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], json!(2));
}

#[actix_web::test]
async fn test_submission_author_cannot_be_spoofed() {
    let fx = fixture().await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/submissions/")
        .insert_header(bearer(&fx.enrolled))
        .set_json(json!({
            "assignment": fx.assignment_id,
            "file": "work.zip",
            "student": fx.outsider.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["student"], json!(fx.enrolled.id));

    // 他人无法读取
    let uri = format!("/api/submissions/{}/", body["data"]["id"]);
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&fx.outsider))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_only_teachers_grade_submissions() {
    let fx = fixture().await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/submissions/")
        .insert_header(bearer(&fx.enrolled))
        .set_json(json!({"assignment": fx.assignment_id, "file": "work.zip", "grade": 100}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/submissions/")
        .insert_header(bearer(&fx.enrolled))
        .set_json(json!({"assignment": fx.assignment_id, "file": "work.zip"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/submissions/{}/", body["data"]["id"]);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(&fx.enrolled))
        .set_json(json!({"grade": 100}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(&fx.teacher))
        .set_json(json!({"grade": 87}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["grade"], json!(87));
    assert_eq!(body["data"]["student"], json!(fx.enrolled.id));
}

#[actix_web::test]
async fn test_review_creation_requires_enrollment() {
    let fx = fixture().await;
    let app = init_app!(fx);

    let cases = [
        (&fx.outsider, json!({"course": fx.course_id, "rating": 4, "comment": "ok"})),
        (&fx.enrolled, json!({"course": 9999, "rating": 4, "comment": "ok"})),
        (&fx.enrolled, json!({"course": "abc", "rating": 4, "comment": "ok"})),
        (&fx.enrolled, json!({"rating": 4, "comment": "ok"})),
    ];
    for (user, payload) in cases {
        let req = test::TestRequest::post()
            .uri("/api/reviews/")
            .insert_header(bearer(user))
            .set_json(payload)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    }

    let req = test::TestRequest::post()
        .uri("/api/reviews/")
        .insert_header(bearer(&fx.enrolled))
        .set_json(json!({"course": fx.course_id, "rating": 6, "comment": "too good"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/reviews/")
        .insert_header(bearer(&fx.enrolled))
        .set_json(json!({
            "course": fx.course_id,
            "rating": 5,
            "comment": "great",
            "student": fx.outsider.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["student"], json!(fx.enrolled.id));

    // 未选课的学生看不到该课程的评价
    let req = test::TestRequest::get()
        .uri("/api/reviews/")
        .insert_header(bearer(&fx.outsider))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], json!(0));
}

#[actix_web::test]
async fn test_enroll_is_idempotent() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let uri = format!("/api/courses/{}/enroll/", fx.course_id);

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(bearer(&fx.outsider))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], json!("enrolled"));
    }

    let course = fx.storage.get_course_by_id(fx.course_id).await.unwrap().unwrap();
    assert_eq!(
        course.students.iter().filter(|id| **id == fx.outsider.id).count(),
        1
    );

    let req = test::TestRequest::post()
        .uri("/api/courses/9999/enroll/")
        .insert_header(bearer(&fx.outsider))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post().uri(&uri).to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_lessons_are_teacher_write_only() {
    let fx = fixture().await;
    let app = init_app!(fx);
    let payload = json!({"course": fx.course_id, "title": "Traits", "content": "..."});

    let req = test::TestRequest::get().uri("/api/lessons/").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/lessons/")
        .set_json(&payload)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri("/api/lessons/")
        .insert_header(bearer(&fx.enrolled))
        .set_json(&payload)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/lessons/")
        .insert_header(bearer(&fx.teacher))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let uri = format!("/api/lessons/{}/", body["data"]["id"]);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&fx.teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("data").is_none());

    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_lesson_requires_existing_course() {
    let fx = fixture().await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/lessons/")
        .insert_header(bearer(&fx.teacher))
        .set_json(json!({"course": 9999, "title": "Orphan", "content": "..."}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_authentication_failures() {
    let fx = fixture().await;
    let app = init_app!(fx);

    let req = test::TestRequest::get()
        .uri("/api/lessons/")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/lessons/")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    // 令牌有效但用户不存在
    let token = JwtUtils::generate_access_token(4242, UserRole::STUDENT).unwrap();
    let req = test::TestRequest::get()
        .uri("/api/lessons/")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_malformed_requests() {
    let fx = fixture().await;
    let app = init_app!(fx);

    let req = test::TestRequest::get().uri("/api/lessons/abc/").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/courses/")
        .insert_header(bearer(&fx.teacher))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/lessons/?page=abc")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_denial_precedes_body_validation() {
    let fx = fixture().await;
    let app = init_app!(fx);

    for uri in [
        "/api/courses/",
        "/api/lessons/",
        "/api/assignments/",
        "/api/submissions/",
        "/api/reviews/",
        "/api/users/",
    ] {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(json!({}))
            .to_request();
        let status = test::call_service(&app, req).await.status();
        assert_eq!(status, StatusCode::UNAUTHORIZED, "anonymous POST {uri}");
    }

    for uri in ["/api/courses/", "/api/lessons/", "/api/assignments/", "/api/users/"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header(bearer(&fx.enrolled))
            .set_json(json!({}))
            .to_request();
        let status = test::call_service(&app, req).await.status();
        assert_eq!(status, StatusCode::FORBIDDEN, "student POST {uri}");
    }

    let course_uri = format!("/api/courses/{}/", fx.course_id);
    let req = test::TestRequest::put()
        .uri(&course_uri)
        .insert_header(bearer(&fx.enrolled))
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/assignments/{}/", fx.assignment_id))
        .insert_header(bearer(&fx.enrolled))
        .set_json(json!({"title": 42}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    // 放行之后才返回参数错误
    let req = test::TestRequest::post()
        .uri("/api/lessons/")
        .insert_header(bearer(&fx.teacher))
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/submissions/")
        .insert_header(bearer(&fx.enrolled))
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_review_denial_without_complete_body() {
    let fx = fixture().await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/reviews/")
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    for payload in [json!({}), json!({"course": fx.course_id}), json!({"comment": "x"})] {
        let req = test::TestRequest::post()
            .uri("/api/reviews/")
            .insert_header(bearer(&fx.outsider))
            .set_json(payload.clone())
            .to_request();
        let status = test::call_service(&app, req).await.status();
        assert_eq!(status, StatusCode::FORBIDDEN, "outsider review {payload}");
    }

    // 已选课学生缺少字段时才是参数错误
    let req = test::TestRequest::post()
        .uri("/api/reviews/")
        .insert_header(bearer(&fx.enrolled))
        .set_json(json!({"course": fx.course_id}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/reviews/")
        .insert_header(bearer(&fx.enrolled))
        .set_json(json!({"course": fx.course_id, "rating": "five", "comment": "x"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_huge_page_number_returns_empty_page() {
    let fx = fixture().await;
    let app = init_app!(fx);

    let req = test::TestRequest::get()
        .uri("/api/lessons/?page=9223372036854775807&size=100")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"], json!([]));

    let req = test::TestRequest::get()
        .uri("/api/courses/?page=9223372036854775807")
        .insert_header(bearer(&fx.teacher))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_course_crud_by_teacher() {
    let fx = fixture().await;
    let app = init_app!(fx);

    let req = test::TestRequest::post()
        .uri("/api/courses/")
        .insert_header(bearer(&fx.teacher))
        .set_json(json!({
            "title": "Async Rust",
            "description": "Futures",
            "teacher": fx.teacher.id,
            "students": [fx.outsider.id],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let uri = format!("/api/courses/{}/", body["data"]["id"]);

    // 教师引用必须是教师角色
    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(&fx.teacher))
        .set_json(json!({"teacher": fx.enrolled.id}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(&fx.teacher))
        .set_json(json!({"title": "Async Rust II"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], json!("Async Rust II"));
    assert_eq!(body["data"]["students"], json!([fx.outsider.id]));

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&fx.enrolled))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&fx.teacher))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_user_endpoints() {
    let fx = fixture().await;
    let app = init_app!(fx);

    let req = test::TestRequest::get().uri("/api/users/me/").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/users/me/")
        .insert_header(bearer(&fx.enrolled))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["username"], json!("alice"));
    assert_eq!(body["data"]["is_student"], json!(true));

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .insert_header(bearer(&fx.enrolled))
        .set_json(json!({"username": "carol", "role": "student"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/users/")
        .insert_header(bearer(&fx.teacher))
        .set_json(json!({"username": "alice", "role": "student"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri("/api/users/9999/")
        .insert_header(bearer(&fx.teacher))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
