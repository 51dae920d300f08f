//! HTML rendering of the view state.
//!
//! [`render`] turns a [`ViewState`] into a [`Page`]: one HTML fragment (or
//! plain text) per page region. Rendering is pure and every interpolated
//! value is HTML-escaped.
//!
//! # Example
//!
//! ```
//! use ailearn_app::render::{render, COURSES_FAILED_MESSAGE};
//! use ailearn_app::state::{Action, Ticket, ViewState};
//!
//! let state = ViewState::default()
//!     .apply(Action::CoursesRequested(Ticket::new(1)))
//!     .apply(Action::CoursesFailed(Ticket::new(1)));
//!
//! assert!(render(&state).course_list.contains(COURSES_FAILED_MESSAGE));
//! ```

use std::fmt::{self, Write};

use ailearn_api::{Course, CourseDetail, Game, Lesson};

use crate::state::{LessonPane, QuizView, Sidebar, Tab, ViewState};

/// Sidebar text when the course list cannot be fetched.
pub const COURSES_FAILED_MESSAGE: &str =
    "Failed to load courses. Make sure the backend is running.";

/// Lesson pane text while a lesson is generated.
pub const LESSON_LOADING_MESSAGE: &str = "Generating lesson content with AI...";

/// Lesson pane text when a lesson cannot be fetched.
pub const LESSON_FAILED_MESSAGE: &str = "Failed to load lesson content.";

const NO_COURSES_HTML: &str = "<p>No courses available</p>";
const NO_QUIZ_HTML: &str = "<p>No quiz available for this lesson.</p>";
const NO_GAME_HTML: &str = "<p>No mini-game available for this lesson.</p>";
const COURSES_LOADING_HTML: &str = "<div class=\"loading\">Loading courses...</div>";
const WELCOME_HTML: &str = "<div class=\"welcome\">\n<h2>Welcome to AI Learn</h2>\n<p>Pick a course and a lesson from the sidebar to get started.</p>\n</div>";

// ============================================================================
// Escaping
// ============================================================================

/// Display adapter that HTML-escapes the wrapped text.
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..pos])?;
            let entity = match rest.as_bytes()[pos] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            };
            f.write_str(entity)?;
            rest = &rest[pos + 1..];
        }
        f.write_str(rest)
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'` for safe inclusion in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    Escaped(text).to_string()
}

// ============================================================================
// Page
// ============================================================================

/// Rendered page, one field per region.
///
/// HTML regions hold markup; the others hold plain text the host sets as
/// text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Sidebar HTML.
    pub course_list: String,
    /// Lesson title text.
    pub lesson_title: String,
    /// Difficulty badge text.
    pub difficulty_badge: String,
    /// Difficulty badge CSS classes.
    pub difficulty_class: String,
    /// Keywords text.
    pub keywords: String,
    /// Lesson pane HTML.
    pub lesson_content: String,
    /// Practice challenge text.
    pub challenge_description: String,
    /// Quiz pane HTML.
    pub quiz_content: String,
    /// Game pane HTML.
    pub game_content: String,
    /// Output console text.
    pub code_output: String,
    /// Active tab.
    pub active_tab: Tab,
    /// Selected editor language.
    pub language: String,
    /// Lesson progress bar width in percent.
    pub progress_percent: u8,
}

impl Page {
    /// Main content of `tab`. The practice tab shows the challenge text.
    #[must_use]
    pub fn tab_content(&self, tab: Tab) -> &str {
        match tab {
            Tab::Learn => &self.lesson_content,
            Tab::Practice => &self.challenge_description,
            Tab::Quiz => &self.quiz_content,
            Tab::Game => &self.game_content,
        }
    }
}

/// Renders every region of the page.
#[must_use]
pub fn render(state: &ViewState) -> Page {
    let course_list = match &state.sidebar {
        Sidebar::Loading => COURSES_LOADING_HTML.to_string(),
        Sidebar::Courses(courses) => course_list(courses),
        Sidebar::Failed => format!("<p class=\"error\">{COURSES_FAILED_MESSAGE}</p>"),
        Sidebar::Modules(course) => module_list(course),
    };

    let lesson_content = match (state.lesson_pane, state.current_lesson.as_deref()) {
        (LessonPane::Loading, _) => format!("<div class=\"loading\">{LESSON_LOADING_MESSAGE}</div>"),
        (LessonPane::Failed, _) => format!("<p class=\"error\">{LESSON_FAILED_MESSAGE}</p>"),
        (LessonPane::Ready, Some(lesson)) => lesson_content(lesson),
        (LessonPane::Welcome | LessonPane::Ready, _) => WELCOME_HTML.to_string(),
    };

    let mut page = Page {
        course_list,
        lesson_content,
        challenge_description: state.challenge_description.clone().unwrap_or_default(),
        quiz_content: state.quiz.as_ref().map(quiz_content).unwrap_or_default(),
        game_content: state.game.as_ref().map(game_content).unwrap_or_default(),
        code_output: state.code_output.clone(),
        active_tab: state.tab,
        language: state.language.clone(),
        progress_percent: if state.lesson_complete { 100 } else { 0 },
        ..Page::default()
    };

    // Header regions keep the last successfully loaded lesson.
    if let Some(lesson) = state.current_lesson.as_deref() {
        let info = &lesson.lesson_info;
        page.lesson_title.clone_from(&info.title);
        page.difficulty_badge.clone_from(&info.difficulty);
        page.difficulty_class = format!("difficulty-badge {}", info.difficulty.to_lowercase());
        page.keywords = info.keywords.join(", ");
    }

    page
}

// ============================================================================
// Sidebar
// ============================================================================

/// One `course-item` entry per course, or the empty-state message.
#[must_use]
pub fn course_list(courses: &[Course]) -> String {
    if courses.is_empty() {
        return NO_COURSES_HTML.to_string();
    }

    let mut out = String::new();
    for course in courses {
        let _ = writeln!(
            out,
            "<div class=\"course-item\" data-course-id=\"{}\">",
            Escaped(&course.id)
        );
        let _ = writeln!(out, "<h3>{}</h3>", Escaped(&course.name));
        let _ = writeln!(
            out,
            "<div class=\"meta\"><span>📚 {} modules</span> <span>| {}</span></div>",
            course.module_count,
            Escaped(&course.language)
        );
        let _ = writeln!(out, "</div>");
    }
    out
}

/// Back button, course heading and the lessons of every module.
#[must_use]
pub fn module_list(course: &CourseDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<button class=\"btn-back\" data-action=\"back\">← Back to Courses</button>"
    );
    let _ = writeln!(out, "<h2>{}</h2>", Escaped(&course.course_name));

    for module in &course.modules {
        let _ = writeln!(out, "<div class=\"module\">");
        let _ = writeln!(out, "<h3>{}</h3>", Escaped(&module.name));
        let _ = writeln!(out, "<div class=\"lesson-list\">");
        for lesson in &module.lessons {
            let _ = writeln!(
                out,
                "<div class=\"lesson-item\" data-lesson-id=\"{}\"><span class=\"difficulty-badge {}\">{}</span> {}</div>",
                Escaped(&lesson.id),
                Escaped(&lesson.difficulty.to_lowercase()),
                Escaped(&lesson.difficulty),
                Escaped(&lesson.title)
            );
        }
        let _ = writeln!(out, "</div>");
        let _ = writeln!(out, "</div>");
    }
    out
}

// ============================================================================
// Lesson, quiz and game panes
// ============================================================================

/// Lesson body sections in reading order.
#[must_use]
pub fn lesson_content(lesson: &Lesson) -> String {
    let content = &lesson.content;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "<section>\n<h2>📖 What You'll Learn</h2>\n<p>{}</p>\n</section>",
        Escaped(&content.explanation)
    );
    let _ = writeln!(
        out,
        "<section>\n<h2>🌍 Real-World Analogy</h2>\n<div class=\"feature-card\"><p>{}</p></div>\n</section>",
        Escaped(&content.analogy)
    );
    let _ = writeln!(
        out,
        "<section>\n<h2>💡 Why It Matters</h2>\n<p>{}</p>\n</section>",
        Escaped(&content.why_it_matters)
    );
    let _ = writeln!(
        out,
        "<section>\n<h2>💻 Code Example</h2>\n<pre><code>{}</code></pre>\n</section>",
        Escaped(&content.code_example)
    );

    let _ = writeln!(out, "<section>\n<h2>🔍 Step-by-Step Breakdown</h2>\n<ol>");
    write_items(&mut out, &content.breakdown);
    let _ = writeln!(out, "</ol>\n</section>");

    let _ = writeln!(out, "<section>\n<h2>⚠️ Common Mistakes</h2>\n<ul>");
    write_items(&mut out, &content.common_mistakes);
    let _ = writeln!(out, "</ul>\n</section>");

    out
}

fn write_items(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "<li>{}</li>", Escaped(item));
    }
}

/// Quiz questions with selections and revealed explanations.
#[must_use]
pub fn quiz_content(quiz: &QuizView) -> String {
    if quiz.is_empty() {
        return NO_QUIZ_HTML.to_string();
    }

    let mut out = String::from("<h2>🎯 Test Your Knowledge</h2>\n");
    for (index, question) in quiz.questions().iter().enumerate() {
        let _ = writeln!(
            out,
            "<div class=\"quiz-question\" data-question-index=\"{index}\">"
        );
        let _ = writeln!(out, "<h3>Question {}</h3>", index + 1);
        let _ = writeln!(out, "<p>{}</p>", Escaped(&question.question));
        let _ = writeln!(out, "<div class=\"quiz-options\">");
        for (key, text) in &question.options {
            let class = if quiz.is_selected(index, key) {
                "quiz-option selected"
            } else {
                "quiz-option"
            };
            let _ = writeln!(
                out,
                "<div class=\"{class}\" data-answer=\"{key}\"><strong>{key}:</strong> {text}</div>",
                key = Escaped(key),
                text = Escaped(text)
            );
        }
        let _ = writeln!(out, "</div>");
        let hidden = if quiz.is_revealed(index) { "" } else { " hidden" };
        let _ = writeln!(
            out,
            "<div class=\"quiz-explanation\"{hidden}><strong>Explanation:</strong> {}</div>",
            Escaped(&question.explanation)
        );
        let _ = writeln!(out, "</div>");
    }
    out
}

/// Mini-game description, instructions and starter code.
#[must_use]
pub fn game_content(game: &Game) -> String {
    if game.is_empty() {
        return NO_GAME_HTML.to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "<h2>🎮 {}</h2>", Escaped(&game.game_name));
    let _ = writeln!(out, "<p>{}</p>", Escaped(&game.description));
    let _ = writeln!(out, "<div class=\"feature-card\">\n<h3>📋 Instructions</h3>\n<ol>");
    write_items(&mut out, &game.instructions);
    let _ = writeln!(out, "</ol>\n</div>");
    let _ = writeln!(
        out,
        "<div class=\"feature-card\">\n<h3>🎯 Learning Goal</h3>\n<p>{}</p>\n</div>",
        Escaped(&game.learning_goal)
    );
    let _ = writeln!(
        out,
        "<div class=\"game-code\">\n<h3>💻 Game Code</h3>\n<pre><code>{}</code></pre>",
        Escaped(&game.starter_code)
    );
    let _ = writeln!(
        out,
        "<button class=\"btn-primary\" data-action=\"try-in-editor\">Try It in Editor →</button>\n</div>"
    );
    out
}
