//! Backend endpoint paths.
//!
//! Paths are relative to the client's base URL and are joined by plain
//! concatenation, so identifiers are inserted verbatim.

/// Course list.
pub const COURSES: &str = "/api/lessons/courses";

/// Code execution.
pub const EXECUTE_CODE: &str = "/api/code/execute";

/// User progress.
pub const USER_PROGRESS: &str = "/api/progress";

/// Backend health check.
pub const HEALTH: &str = "/api/health";

/// Module and lesson tree of one course.
#[must_use]
pub fn course_modules(course_id: &str) -> String {
    format!("{COURSES}/{course_id}/modules")
}

/// Lesson content.
#[must_use]
pub fn lesson(lesson_id: &str) -> String {
    format!("/api/lessons/{lesson_id}")
}

/// Quiz questions for a lesson.
#[must_use]
pub fn quiz(lesson_id: &str) -> String {
    format!("{}/quiz", lesson(lesson_id))
}

/// Mini-game for a lesson.
#[must_use]
pub fn game(lesson_id: &str) -> String {
    format!("{}/game", lesson(lesson_id))
}
