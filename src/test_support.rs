use std::sync::{Arc, OnceLock};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    Router,
};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tower::ServiceExt;

use crate::api;
use crate::core::{config::Settings, state::AppState};
use crate::store::memory::MemoryStore;

pub(crate) struct TestContext {
    pub(crate) state: AppState,
    pub(crate) app: Router,
    _guard: OwnedMutexGuard<()>,
}

pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

pub(crate) fn set_test_env() {
    std::env::set_var("NEXEL_ENV", "test");
    std::env::set_var("PROJECT_NAME", "Nexel API");
    std::env::set_var("PROMETHEUS_ENABLED", "0");
    std::env::remove_var("NEXEL_SEED_DEMO");
}

pub(crate) async fn setup_test_context() -> TestContext {
    setup_test_context_with(|| {}).await
}

pub(crate) async fn setup_test_context_with(configure: impl FnOnce()) -> TestContext {
    let guard = env_lock().await;
    set_test_env();
    configure();

    let settings = Settings::load().expect("settings");
    let state = AppState::new(settings, Arc::new(MemoryStore::new()));
    let app = api::router::router(state.clone());

    TestContext { state, app, _guard: guard }
}

pub(crate) fn json_request(
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    if let Some(body) = body {
        let bytes = serde_json::to_vec(&body).expect("serialize body");
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .expect("request body")
    } else {
        builder.body(Body::empty()).expect("request body")
    }
}

pub(crate) async fn read_json(response: axum::response::Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    serde_json::from_slice(&body).unwrap_or_else(|err| {
        let body_text = String::from_utf8_lossy(&body);
        panic!("json parse: {err}; body: {body_text}");
    })
}

pub(crate) async fn register_student(app: &Router, name: &str, email: &str) -> String {
    register_user(app, name, email, "student").await
}

pub(crate) async fn register_teacher(app: &Router, name: &str, email: &str) -> String {
    register_user(app, name, email, "teacher").await
}

async fn register_user(app: &Router, name: &str, email: &str, role: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/users",
            Some(serde_json::json!({"name": name, "email": email, "role": role})),
        ))
        .await
        .expect("register user");
    let body = read_json(response).await;
    body["id"].as_str().unwrap_or_else(|| panic!("user id missing: {body}")).to_string()
}

/// Direct-store fixtures for service-level tests, bypassing the HTTP layer.
pub(crate) mod fixtures {
    use uuid::Uuid;

    use crate::domain::models::{Assignment, Course, Submission, User};
    use crate::domain::types::UserRole;
    use crate::repositories;
    use crate::store::RecordStore;

    pub(crate) async fn teacher(store: &dyn RecordStore, name: &str) -> User {
        user(store, name, UserRole::Teacher).await
    }

    pub(crate) async fn student(store: &dyn RecordStore, name: &str) -> User {
        user(store, name, UserRole::Student).await
    }

    async fn user(store: &dyn RecordStore, name: &str, role: UserRole) -> User {
        let slug = name.to_lowercase().replace(' ', ".");
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: format!("{slug}@example.com"),
            role,
            last_login: None,
            login_streak: 0,
            badges: Vec::new(),
        };
        repositories::users::insert(store, &user).await.expect("insert user");
        user
    }

    pub(crate) async fn course(store: &dyn RecordStore, title: &str, teacher_id: &str) -> Course {
        course_with_prerequisites(store, title, teacher_id, &[]).await
    }

    pub(crate) async fn course_with_prerequisites(
        store: &dyn RecordStore,
        title: &str,
        teacher_id: &str,
        prerequisites: &[&str],
    ) -> Course {
        let course = Course {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: String::new(),
            duration: "4 Weeks".to_string(),
            teacher_id: teacher_id.to_string(),
            students_enrolled: Vec::new(),
            modules: Vec::new(),
            prerequisites: prerequisites.iter().map(|id| id.to_string()).collect(),
        };
        repositories::courses::insert(store, &course).await.expect("insert course");
        course
    }

    pub(crate) async fn assignment(
        store: &dyn RecordStore,
        course_id: &str,
        title: &str,
    ) -> Assignment {
        let assignment = Assignment {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            deadline: None,
        };
        repositories::assignments::insert(store, &assignment).await.expect("insert assignment");
        assignment
    }

    pub(crate) async fn submission(
        store: &dyn RecordStore,
        assignment_id: &str,
        student_id: &str,
    ) -> Submission {
        let submission = Submission {
            id: Uuid::new_v4().to_string(),
            assignment_id: assignment_id.to_string(),
            student_id: student_id.to_string(),
            content: Some("submitted work".to_string()),
            file_name: None,
            grade: None,
            letter_grade: None,
            review: None,
        };
        repositories::submissions::insert(store, &submission).await.expect("insert submission");
        submission
    }

    pub(crate) async fn orphan_submission(
        store: &dyn RecordStore,
        assignment_id: &str,
        student_id: &str,
    ) -> Submission {
        submission(store, assignment_id, student_id).await
    }
}
