//! Application controller.
//!
//! [`App`] reacts to user events: it issues backend requests through a
//! [`LessonApi`], folds the outcomes into the [`ViewState`] and drives the
//! editor. Backend failures never escape a handler; they are logged and
//! turned into the fallback content of the affected region.

use ailearn_api::LessonApi;
use ailearn_editor::{Editor, EditorRuntime, EditorWidget, DEFAULT_LANGUAGE};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::render::{self, Page};
use crate::state::{Action, Tab, Ticket, ViewState};

/// Console text shown while code "runs".
pub const RUNNING_CODE_MESSAGE: &str = "Running code...";

/// Confirmation shown when a lesson is marked complete.
pub const LESSON_COMPLETE_MESSAGE: &str = "Lesson marked as complete! 🎉";

/// The client application.
///
/// # Example
///
/// ```no_run
/// use ailearn_api::ApiClient;
/// use ailearn_app::{App, Config};
/// use ailearn_editor::{HeadlessRuntime, TextBuffer};
///
/// # async fn example() -> ailearn_app::Result<()> {
/// let config = Config::default();
/// let mut app: App<ApiClient, TextBuffer> =
///     App::new(ApiClient::new("http://localhost:8000"), config);
///
/// app.start(HeadlessRuntime::new()).await?;
/// println!("{}", app.page().course_list);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct App<A, W> {
    api: A,
    editor: Editor<W>,
    config: Config,
    state: ViewState,
    next_ticket: u64,
}

impl<A: LessonApi, W: EditorWidget> App<A, W> {
    /// Creates the application in its initial state.
    #[must_use]
    pub fn new(api: A, config: Config) -> Self {
        let editor = Editor::new(config.templates());
        let state = ViewState::new(config.default_language.clone());
        Self {
            api,
            editor,
            config,
            state,
            next_ticket: 0,
        }
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Renders the current view state.
    #[must_use]
    pub fn page(&self) -> Page {
        render::render(&self.state)
    }

    /// Backend client.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Editor handle.
    #[must_use]
    pub const fn editor(&self) -> &Editor<W> {
        &self.editor
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    fn dispatch(&mut self, action: Action) {
        self.state = std::mem::take(&mut self.state).apply(action);
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket::new(self.next_ticket)
    }

    /// Starts constructing the editor, then loads the course list.
    ///
    /// The editor is not awaited; the returned handle completes once it is
    /// ready (or failed to load).
    ///
    /// # Errors
    ///
    /// Returns an error if the application was already started.
    pub async fn start<R>(&mut self, runtime: R) -> Result<JoinHandle<()>>
    where
        R: EditorRuntime<Widget = W>,
    {
        info!("Initializing AI Learn");
        let editor_ready = self.start_editor(runtime)?;

        self.load_courses().await;
        info!("Application initialized");
        Ok(editor_ready)
    }

    /// Starts constructing the editor without touching the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor was already started.
    pub fn start_editor<R>(&self, runtime: R) -> Result<JoinHandle<()>>
    where
        R: EditorRuntime<Widget = W>,
    {
        let handle =
            self.editor
                .initialize(runtime, self.config.editor_options(), || info!("Editor ready"))?;
        Ok(handle)
    }

    /// Fetches the course list. Also used by the "back" button.
    pub async fn load_courses(&mut self) {
        let ticket = self.issue_ticket();
        self.dispatch(Action::CoursesRequested(ticket));

        match self.api.courses().await {
            Ok(courses) => {
                info!(count = courses.len(), "Loaded courses");
                self.dispatch(Action::CoursesLoaded { ticket, courses });
            }
            Err(e) => {
                error!(error = %e, "Failed to load courses");
                self.dispatch(Action::CoursesFailed(ticket));
            }
        }
    }

    /// Fetches and shows the modules of a course.
    ///
    /// On failure the sidebar keeps what it showed before.
    pub async fn open_course(&mut self, course_id: &str) {
        let ticket = self.issue_ticket();
        self.dispatch(Action::CourseRequested(ticket));

        match self.api.course_modules(course_id).await {
            Ok(course) => {
                info!(course_id, modules = course.modules.len(), "Loaded course modules");
                self.dispatch(Action::CourseLoaded { ticket, course });
            }
            Err(e) => error!(course_id, error = %e, "Failed to load course modules"),
        }
    }

    /// Fetches and shows a lesson.
    pub async fn open_lesson(&mut self, lesson_id: &str) {
        self.load_lesson(lesson_id, false).await;
    }

    /// Asks the backend to regenerate the current lesson.
    pub async fn regenerate_lesson(&mut self) {
        let Some(lesson_id) = self.state.lesson_id().map(str::to_string) else {
            warn!("No current lesson to regenerate");
            return;
        };
        self.load_lesson(&lesson_id, true).await;
    }

    /// Fetches a lesson, optionally asking the backend to regenerate it.
    ///
    /// Shows the loading message until the lesson arrives. On success the
    /// practice challenge (if any) seeds the editor with its starter code, or
    /// the Python template when it has none.
    pub async fn load_lesson(&mut self, lesson_id: &str, regenerate: bool) {
        let ticket = self.issue_ticket();
        self.dispatch(Action::LessonRequested(ticket));

        let lesson = match self.api.lesson(lesson_id, regenerate).await {
            Ok(lesson) => lesson,
            Err(e) => {
                error!(lesson_id, error = %e, "Failed to load lesson");
                self.dispatch(Action::LessonFailed(ticket));
                return;
            }
        };

        info!(lesson_id, regenerate, title = %lesson.lesson_info.title, "Loaded lesson");
        let starter_code = lesson.content.practice_challenge.as_ref().map(|challenge| {
            challenge
                .starter_code
                .clone()
                .unwrap_or_else(|| self.editor.templates().get(DEFAULT_LANGUAGE).to_string())
        });

        self.dispatch(Action::LessonLoaded {
            ticket,
            lesson: Box::new(lesson),
        });
        if let Some(code) = starter_code {
            self.editor.set_code(&code).await;
        }
    }

    /// Activates a tab. Entering the quiz or game tab refetches its content
    /// whenever a lesson is open.
    pub async fn switch_tab(&mut self, tab: Tab) {
        self.dispatch(Action::TabSelected(tab));

        match tab {
            Tab::Quiz => self.load_quiz().await,
            Tab::Game => self.load_game().await,
            Tab::Learn | Tab::Practice => {}
        }
    }

    async fn load_quiz(&mut self) {
        let Some(lesson_id) = self.state.lesson_id().map(str::to_string) else {
            return;
        };
        let ticket = self.issue_ticket();
        self.dispatch(Action::QuizRequested(ticket));

        match self.api.quiz(&lesson_id, self.config.quiz_questions).await {
            Ok(response) => {
                info!(lesson_id, questions = response.quiz.questions.len(), "Loaded quiz");
                self.dispatch(Action::QuizLoaded {
                    ticket,
                    quiz: response.quiz,
                });
            }
            Err(e) => error!(lesson_id, error = %e, "Failed to load quiz"),
        }
    }

    async fn load_game(&mut self) {
        let Some(lesson_id) = self.state.lesson_id().map(str::to_string) else {
            return;
        };
        let ticket = self.issue_ticket();
        self.dispatch(Action::GameRequested(ticket));

        match self.api.game(&lesson_id).await {
            Ok(response) => {
                info!(lesson_id, game = %response.game.game_name, "Loaded mini-game");
                self.dispatch(Action::GameLoaded {
                    ticket,
                    game: response.game,
                });
            }
            Err(e) => error!(lesson_id, error = %e, "Failed to load mini-game"),
        }
    }

    /// Marks a quiz option as chosen and reveals the explanation.
    pub fn select_quiz_option(&mut self, question: usize, key: &str) {
        self.dispatch(Action::QuizOptionSelected {
            question,
            key: key.to_string(),
        });
    }

    /// Switches the editor language. Returns whether the editor text was
    /// replaced by the language's template.
    pub async fn change_language(&mut self, language: &str) -> bool {
        self.dispatch(Action::LanguageSelected(language.to_string()));
        self.editor.change_language(language).await
    }

    /// Shows the editor contents in the output console.
    ///
    /// Nothing is executed; see [`LessonApi::execute_code`] for the backend
    /// capability.
    pub async fn run_code(&mut self) {
        self.dispatch(Action::CodeOutput(RUNNING_CODE_MESSAGE.to_string()));

        let code = self.editor.code().await;
        let output = format!(
            "Code execution coming soon!\n\nYour {} code:\n{code}",
            self.state.language
        );
        self.dispatch(Action::CodeOutput(output));
    }

    /// Marks the current lesson as complete.
    ///
    /// Returns the confirmation text, or `None` without a current lesson.
    /// Progress is not sent to the backend.
    pub fn mark_complete(&mut self) -> Option<&'static str> {
        self.state.current_lesson.as_ref()?;
        self.dispatch(Action::LessonCompleted);
        info!(lesson_id = ?self.state.lesson_id(), "Lesson marked as complete");
        Some(LESSON_COMPLETE_MESSAGE)
    }

    /// Copies the mini-game's starter code into the editor and switches to
    /// the practice tab. Returns `false` when no game is shown.
    pub async fn try_game_in_editor(&mut self) -> bool {
        let Some(code) = self
            .state
            .game
            .as_ref()
            .filter(|game| !game.is_empty())
            .map(|game| game.starter_code.clone())
        else {
            warn!("No mini-game to open in the editor");
            return false;
        };

        self.editor.set_code(&code).await;
        self.switch_tab(Tab::Practice).await;
        true
    }
}
