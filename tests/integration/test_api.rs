//! Integration tests for the HTTP API client against a stub backend.

mod common;

use ailearn_api::{ApiClient, ApiError, Course, LessonApi, RequestOptions};
use common::spawn_backend;

// ============================================================================
// Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_courses_are_decoded() {
    let server = spawn_backend().await;
    let client = ApiClient::new(&server.base_url);

    let courses = client.courses().await.expect("courses");

    assert_eq!(courses.len(), 2);
    assert_eq!(
        courses[0],
        Course {
            id: "c1".to_string(),
            name: "Python Basics".to_string(),
            language: "python".to_string(),
            module_count: 3,
        }
    );
    assert_eq!(server.backend.hits(), vec!["/api/lessons/courses"]);
}

#[tokio::test]
async fn test_course_modules_path() {
    let server = spawn_backend().await;
    let client = ApiClient::new(&server.base_url);

    let detail = client.course_modules("c1").await.expect("modules");

    assert_eq!(detail.course_name, "Python Basics");
    assert_eq!(detail.modules[0].lessons.len(), 2);
    assert_eq!(detail.modules[0].lessons[1].difficulty, "Intermediate");
    assert_eq!(server.backend.count("/api/lessons/courses/c1/modules"), 1);
}

#[tokio::test]
async fn test_lesson_regenerate_query() {
    let server = spawn_backend().await;
    let client = ApiClient::new(&server.base_url);

    let lesson = client.lesson("l1", false).await.expect("lesson");
    assert_eq!(lesson.id(), "l1");
    assert_eq!(lesson.content.breakdown.len(), 3);

    client.lesson("l1", true).await.expect("regenerated lesson");

    assert_eq!(
        server.backend.hits(),
        vec!["/api/lessons/l1", "/api/lessons/l1?regenerate=true"]
    );
}

#[tokio::test]
async fn test_quiz_keeps_option_order_and_question_count_query() {
    let server = spawn_backend().await;
    let client = ApiClient::new(&server.base_url);

    let response = client.quiz("l1", 3).await.expect("quiz");

    let keys: Vec<&str> = response.quiz.questions[0]
        .options
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["A", "B", "C"]);
    assert_eq!(server.backend.count("/api/lessons/l1/quiz?num_questions=3"), 1);
}

#[tokio::test]
async fn test_game() {
    let server = spawn_backend().await;
    let client = ApiClient::new(&server.base_url);

    let response = client.game("l1").await.expect("game");

    assert_eq!(response.game.game_name, "Swap Shop");
    assert_eq!(response.game.instructions.len(), 2);
    assert_eq!(server.backend.count("/api/lessons/l1/game"), 1);
}

#[tokio::test]
async fn test_execute_code_posts_json() {
    let server = spawn_backend().await;
    let client = ApiClient::new(&server.base_url);

    let result = client
        .execute_code("print('hi')", "python")
        .await
        .expect("execute");
    assert_eq!(result.output, "Hello, World!\n");
    assert!(result.error.is_none());

    let call = server.backend.last_execute().expect("execute request");
    assert_eq!(call.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        call.body,
        serde_json::json!({"code": "print('hi')", "language": "python"})
    );
}

#[tokio::test]
async fn test_progress_and_health() {
    let server = spawn_backend().await;
    let client = ApiClient::new(&server.base_url);

    let progress = client.user_progress().await.expect("progress");
    assert_eq!(progress["total_xp"], 50);

    let health = client.health().await.expect("health");
    assert_eq!(health.status, "healthy");
    assert_eq!(health.services.get("ai").map(String::as_str), Some("ok"));
}

// ============================================================================
// Error Tests
// ============================================================================

#[tokio::test]
async fn test_server_error_includes_status() {
    let server = spawn_backend().await;
    server.backend.fail_requests_to("/api/lessons");
    let client = ApiClient::new(&server.base_url);

    let err = client.courses().await.expect_err("500 must fail");

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.to_string(), "API Error: 500 Internal Server Error");
}

#[tokio::test]
async fn test_not_found_is_status_error() {
    let server = spawn_backend().await;
    let client = ApiClient::new(&server.base_url);

    let err = client.course_modules("missing").await.expect_err("404");

    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let server = spawn_backend().await;
    let client = ApiClient::new(&server.base_url);

    let result: ailearn_api::Result<Vec<Course>> =
        client.request("/api/health", RequestOptions::get()).await;

    assert!(matches!(result, Err(ApiError::Decode { .. })));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let server = spawn_backend().await;
    let base_url = server.base_url.clone();
    drop(server);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let err = ApiClient::new(base_url)
        .courses()
        .await
        .expect_err("no server");

    assert!(matches!(err, ApiError::Transport(_)));
    assert!(err.status_code().is_none());
}
