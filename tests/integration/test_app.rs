//! End-to-end tests: the application controller driving the real HTTP client
//! against a stub backend.

mod common;

use ailearn_api::ApiClient;
use ailearn_app::render::{COURSES_FAILED_MESSAGE, LESSON_FAILED_MESSAGE};
use ailearn_app::state::{LessonPane, Sidebar};
use ailearn_app::{App, Config, Tab};
use ailearn_editor::{HeadlessRuntime, TextBuffer};
use common::{spawn_backend, StubServer};

async fn started_app(server: &StubServer) -> App<ApiClient, TextBuffer> {
    let config = Config {
        api_base_url: server.base_url.clone(),
        ..Config::default()
    };
    config.validate().expect("valid config");

    let mut app = App::new(ApiClient::new(&server.base_url), config);
    app.start(HeadlessRuntime::new())
        .await
        .expect("start")
        .await
        .expect("editor load");
    app
}

#[tokio::test]
async fn test_browse_course_to_lesson() {
    let server = spawn_backend().await;
    let mut app = started_app(&server).await;

    let page = app.page();
    assert_eq!(page.course_list.matches("class=\"course-item\"").count(), 2);
    assert!(page.course_list.contains("<h3>Python Basics</h3>"));
    assert!(page.course_list.contains("📚 3 modules"));
    assert!(page.course_list.contains("| python"));

    app.open_course("c1").await;
    assert_eq!(server.backend.count("/api/lessons/courses/c1/modules"), 1);
    let page = app.page();
    assert!(page.course_list.contains("data-lesson-id=\"l2\""));
    assert!(page.course_list.contains("difficulty-badge intermediate"));

    app.open_lesson("l1").await;
    let page = app.page();
    assert_eq!(page.lesson_title, "Variables");
    assert_eq!(page.keywords, "variables, assignment");
    assert!(page.lesson_content.contains("x = 1\nif x &lt; 2:"));
    assert_eq!(
        page.challenge_description,
        "Store your name in a variable and print it."
    );
    assert_eq!(app.editor().code().await, "name = \"\"\nprint(name)\n");
}

#[tokio::test]
async fn test_quiz_tab_refetches_each_time() {
    let server = spawn_backend().await;
    let mut app = started_app(&server).await;
    app.open_lesson("l1").await;

    app.switch_tab(Tab::Quiz).await;
    app.switch_tab(Tab::Learn).await;
    app.switch_tab(Tab::Quiz).await;

    assert_eq!(
        server.backend.count("/api/lessons/l1/quiz?num_questions=5"),
        2
    );

    app.select_quiz_option(0, "A");
    let html = app.page().quiz_content;
    assert!(html.contains(r#"class="quiz-option selected" data-answer="A""#));
    assert!(html.contains("<strong>Explanation:</strong> A single = assigns."));
    assert!(!html.contains("quiz-explanation\" hidden"));
}

#[tokio::test]
async fn test_game_into_editor() {
    let server = spawn_backend().await;
    let mut app = started_app(&server).await;
    app.open_lesson("l1").await;

    app.switch_tab(Tab::Game).await;
    assert!(app.page().game_content.contains("🎮 Swap Shop"));

    assert!(app.try_game_in_editor().await);
    assert_eq!(app.state().tab, Tab::Practice);
    assert_eq!(app.editor().code().await, "a, b = 1, 2\n");
}

#[tokio::test]
async fn test_courses_failure_shows_fallback() {
    let server = spawn_backend().await;
    server.backend.fail_requests_to("/api/lessons/courses");
    let app = started_app(&server).await;

    assert_eq!(app.state().sidebar, Sidebar::Failed);
    assert!(app.page().course_list.contains(COURSES_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_lesson_failure_leaves_other_regions() {
    let server = spawn_backend().await;
    let mut app = started_app(&server).await;
    app.open_course("c1").await;
    let sidebar_before = app.page().course_list;

    server.backend.fail_requests_to("/api/lessons/l1");
    app.open_lesson("l1").await;

    assert_eq!(app.state().lesson_pane, LessonPane::Failed);
    let page = app.page();
    assert!(page.lesson_content.contains(LESSON_FAILED_MESSAGE));
    assert_eq!(page.course_list, sidebar_before);
}

#[tokio::test]
async fn test_unknown_course_leaves_sidebar() {
    let server = spawn_backend().await;
    let mut app = started_app(&server).await;
    let sidebar_before = app.page().course_list;

    app.open_course("missing").await;

    assert!(matches!(app.state().sidebar, Sidebar::Courses(_)));
    assert!(app.state().current_course.is_none());
    assert_eq!(app.page().course_list, sidebar_before);
}

#[tokio::test]
async fn test_quiz_failure_keeps_previous_quiz() {
    let server = spawn_backend().await;
    let mut app = started_app(&server).await;
    app.open_lesson("l1").await;
    app.switch_tab(Tab::Quiz).await;
    app.select_quiz_option(0, "A");
    let quiz_before = app.page().quiz_content;

    server.backend.fail_requests_to("/api/lessons/l1/quiz");
    app.switch_tab(Tab::Learn).await;
    app.switch_tab(Tab::Quiz).await;

    assert_eq!(app.state().tab, Tab::Quiz);
    assert_eq!(app.page().quiz_content, quiz_before);
}

#[tokio::test]
async fn test_game_failure_keeps_previous_game() {
    let server = spawn_backend().await;
    let mut app = started_app(&server).await;
    app.open_lesson("l1").await;
    app.switch_tab(Tab::Game).await;
    let game_before = app.page().game_content;
    assert!(game_before.contains("Swap Shop"));

    server.backend.fail_requests_to("/api/lessons/l1/game");
    app.switch_tab(Tab::Game).await;

    assert_eq!(app.page().game_content, game_before);
}

#[tokio::test]
async fn test_run_code_does_not_call_backend() {
    let server = spawn_backend().await;
    let mut app = started_app(&server).await;

    app.change_language("java").await;
    app.run_code().await;

    assert!(app
        .page()
        .code_output
        .starts_with("Code execution coming soon!\n\nYour java code:\npublic class Main {"));
    assert!(server.backend.last_execute().is_none());
    assert_eq!(server.backend.hits(), vec!["/api/lessons/courses"]);
}
