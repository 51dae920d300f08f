//! Stub AI Learn backend shared by the integration tests.
//!
//! Serves canned JSON for every endpoint the client uses and records each
//! request (path plus query) so tests can count fetches.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// Body and content type of the last code-execution request.
#[derive(Debug, Clone)]
pub struct ExecuteCall {
    pub content_type: Option<String>,
    pub body: Value,
}

/// Shared state of the stub backend.
#[derive(Debug, Default)]
pub struct Backend {
    hits: Mutex<Vec<String>>,
    failing_prefix: Mutex<Option<String>>,
    last_execute: Mutex<Option<ExecuteCall>>,
}

impl Backend {
    /// Every request seen so far as `path?query`.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().expect("hits lock").clone()
    }

    /// Number of requests whose `path?query` equals `target`.
    pub fn count(&self, target: &str) -> usize {
        self.hits().iter().filter(|h| *h == target).count()
    }

    /// Makes every request whose path starts with `prefix` fail with 500.
    pub fn fail_requests_to(&self, prefix: &str) {
        *self.failing_prefix.lock().expect("prefix lock") = Some(prefix.to_string());
    }

    /// Last code-execution request, if any.
    pub fn last_execute(&self) -> Option<ExecuteCall> {
        self.last_execute.lock().expect("execute lock").clone()
    }
}

/// Running stub server.
pub struct StubServer {
    pub base_url: String,
    pub backend: Arc<Backend>,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Helper to find an available port for testing.
fn find_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

/// Spawns the stub backend on a random local port.
pub async fn spawn_backend() -> StubServer {
    let backend = Arc::new(Backend::default());
    let port = find_available_port();
    let addr = format!("127.0.0.1:{port}");

    let router = Router::new()
        .route("/api/lessons/courses", get(courses))
        .route("/api/lessons/courses/:course_id/modules", get(course_modules))
        .route("/api/lessons/:lesson_id", get(lesson))
        .route("/api/lessons/:lesson_id/quiz", get(quiz))
        .route("/api/lessons/:lesson_id/game", get(game))
        .route("/api/code/execute", post(execute))
        .route("/api/progress", get(progress))
        .route("/api/health", get(health))
        .layer(middleware::from_fn_with_state(Arc::clone(&backend), record))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&backend));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });

    // Give the server a moment to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    StubServer {
        base_url: format!("http://{addr}"),
        backend,
        handle,
    }
}

async fn record(State(backend): State<Arc<Backend>>, request: Request, next: Next) -> Response {
    let uri = request.uri();
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);
    backend.hits.lock().expect("hits lock").push(target);

    let failing = backend
        .failing_prefix
        .lock()
        .expect("prefix lock")
        .clone()
        .is_some_and(|prefix| uri.path().starts_with(&prefix));
    if failing {
        return Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Body::from("boom"))
            .expect("valid response");
    }

    next.run(request).await
}

async fn courses() -> Json<Value> {
    Json(json!([
        {"id": "c1", "name": "Python Basics", "module_count": 3, "language": "python"},
        {"id": "c2", "name": "JavaScript Fundamentals", "module_count": 2, "language": "javascript"}
    ]))
}

async fn course_modules(Path(course_id): Path<String>) -> Response {
    if course_id != "c1" {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Course not found"}))).into_response();
    }
    Json(json!({
        "course_id": "c1",
        "course_name": "Python Basics",
        "language": "python",
        "modules": [{
            "id": "m1",
            "name": "Getting Started",
            "lesson_count": 2,
            "lessons": [
                {"id": "l1", "title": "Variables", "difficulty": "Beginner", "keywords": ["variables"]},
                {"id": "l2", "title": "Loops", "difficulty": "Intermediate", "keywords": ["for", "while"]}
            ]
        }]
    }))
    .into_response()
}

async fn lesson(Path(lesson_id): Path<String>) -> Json<Value> {
    Json(json!({
        "lesson_info": {
            "id": lesson_id,
            "title": "Variables",
            "difficulty": "Beginner",
            "keywords": ["variables", "assignment"],
            "module_id": "m1",
            "course_id": "c1"
        },
        "content": {
            "explanation": "A variable names a value.",
            "analogy": "A labelled jar.",
            "why_it_matters": "Every program keeps state.",
            "code_example": "x = 1\nif x < 2:\n    print(x)",
            "breakdown": ["Assign 1 to x", "Compare x with 2", "Print x"],
            "common_mistakes": ["Using a name before assigning it"],
            "practice_challenge": {
                "description": "Store your name in a variable and print it.",
                "starter_code": "name = \"\"\nprint(name)\n",
                "expected_output": null
            }
        }
    }))
}

async fn quiz(Path(lesson_id): Path<String>) -> Json<Value> {
    Json(json!({
        "lesson_id": lesson_id,
        "lesson_title": "Variables",
        "quiz": {
            "questions": [{
                "question": "Which line assigns a variable?",
                "options": {"A": "x == 1", "B": "x = 1", "C": "print(x)"},
                "correct_answer": "B",
                "explanation": "A single = assigns."
            }]
        }
    }))
}

async fn game(Path(lesson_id): Path<String>) -> Json<Value> {
    Json(json!({
        "lesson_id": lesson_id,
        "lesson_title": "Variables",
        "game": {
            "game_name": "Swap Shop",
            "description": "Swap two values.",
            "instructions": ["Read the code", "Swap a and b"],
            "learning_goal": "Tuple assignment.",
            "starter_code": "a, b = 1, 2\n"
        }
    }))
}

async fn execute(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    *backend.last_execute.lock().expect("execute lock") = Some(ExecuteCall {
        content_type,
        body,
    });
    Json(json!({"output": "Hello, World!\n", "error": null, "execution_time": 0.02}))
}

async fn progress() -> Json<Value> {
    Json(json!({"completed_lessons": ["l1"], "total_xp": 50}))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "services": {"ai": "ok", "database": "ok"}}))
}
