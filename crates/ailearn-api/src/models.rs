//! View-models decoded from backend responses.
//!
//! Field names follow the backend's `snake_case` JSON. Collections and
//! AI-generated text default to empty so a partially generated payload still
//! decodes; identifiers and titles are required.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Courses
// ============================================================================

/// Entry of the course list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Programming language taught by the course.
    pub language: String,
    /// Number of modules in the course.
    pub module_count: u32,
}

/// A course with its ordered modules and lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetail {
    /// Course identifier.
    #[serde(default)]
    pub course_id: String,
    /// Display name of the course.
    pub course_name: String,
    /// Programming language taught by the course.
    #[serde(default)]
    pub language: String,
    /// Modules in course order.
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// An ordered group of lessons inside a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module identifier.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Number of lessons as reported by the backend.
    #[serde(default)]
    pub lesson_count: u32,
    /// Lessons in module order.
    #[serde(default)]
    pub lessons: Vec<LessonSummary>,
}

/// Clickable lesson entry in a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSummary {
    /// Lesson identifier.
    pub id: String,
    /// Lesson title.
    pub title: String,
    /// Difficulty label such as `Beginner`.
    pub difficulty: String,
    /// Topic keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
}

// ============================================================================
// Lessons
// ============================================================================

/// Full lesson payload: metadata plus AI-generated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Lesson metadata.
    pub lesson_info: LessonInfo,
    /// Generated lesson body.
    pub content: LessonBody,
}

impl Lesson {
    /// Returns the lesson identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.lesson_info.id
    }
}

/// Lesson metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonInfo {
    /// Lesson identifier.
    pub id: String,
    /// Lesson title.
    pub title: String,
    /// Difficulty label.
    pub difficulty: String,
    /// Topic keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Owning module, when the backend knows it.
    #[serde(default)]
    pub module_id: Option<String>,
    /// Owning course, when the backend knows it.
    #[serde(default)]
    pub course_id: Option<String>,
}

/// AI-generated lesson body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonBody {
    /// Main explanation.
    pub explanation: String,
    /// Real-world analogy.
    pub analogy: String,
    /// Why the topic matters.
    pub why_it_matters: String,
    /// Example source code.
    pub code_example: String,
    /// Ordered breakdown of the code example.
    pub breakdown: Vec<String>,
    /// Ordered list of common mistakes.
    pub common_mistakes: Vec<String>,
    /// Optional hands-on challenge.
    pub practice_challenge: Option<PracticeChallenge>,
}

/// Hands-on challenge attached to a lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeChallenge {
    /// What the learner should build.
    pub description: String,
    /// Code to seed the editor with.
    pub starter_code: Option<String>,
    /// Expected program output.
    pub expected_output: Option<String>,
}

// ============================================================================
// Quizzes
// ============================================================================

/// Response of the quiz endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    /// Lesson the quiz belongs to.
    #[serde(default)]
    pub lesson_id: String,
    /// Title of that lesson.
    #[serde(default)]
    pub lesson_title: String,
    /// The generated quiz.
    #[serde(default)]
    pub quiz: Quiz,
}

/// Multiple-choice quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Questions in display order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question text.
    pub question: String,
    /// Option key (`A`, `B`, ...) to option text, in the order sent.
    #[serde(default)]
    pub options: IndexMap<String, String>,
    /// Explanation revealed after an answer is picked.
    #[serde(default)]
    pub explanation: String,
    /// Key of the correct option. Decoded but never used for grading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

// ============================================================================
// Mini-games
// ============================================================================

/// Response of the mini-game endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResponse {
    /// Lesson the game belongs to.
    #[serde(default)]
    pub lesson_id: String,
    /// Title of that lesson.
    #[serde(default)]
    pub lesson_title: String,
    /// The generated game.
    #[serde(default)]
    pub game: Game,
}

/// Interactive coding exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Game {
    /// Game name; empty when the backend could not produce a game.
    pub game_name: String,
    /// Short description.
    pub description: String,
    /// Ordered instructions.
    pub instructions: Vec<String>,
    /// What the learner should take away.
    pub learning_goal: String,
    /// Code to start from.
    pub starter_code: String,
}

impl Game {
    /// Returns `true` if the backend returned no playable game.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.game_name.is_empty()
    }
}

// ============================================================================
// Code execution, progress and health
// ============================================================================

/// Body of the code-execution request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Source code to run.
    pub code: String,
    /// Language of the source code.
    pub language: String,
    /// Optional standard input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdin: Option<String>,
}

/// Result of running code on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Captured standard output.
    #[serde(default)]
    pub output: String,
    /// Captured error output, if the program failed.
    #[serde(default)]
    pub error: Option<String>,
    /// Wall-clock execution time in seconds.
    #[serde(default)]
    pub execution_time: f64,
}

/// Backend health report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Overall status, `healthy` when the API is up.
    pub status: String,
    /// Per-service status.
    #[serde(default)]
    pub services: IndexMap<String, String>,
}
