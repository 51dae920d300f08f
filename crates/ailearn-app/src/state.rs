//! Immutable view state and its transition function.
//!
//! Every user event and every backend completion is an [`Action`]. The
//! controller folds actions into a [`ViewState`] with [`ViewState::apply`];
//! the renderer only ever reads the result.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ailearn_api::{Course, CourseDetail, Game, Lesson, Question, Quiz};
use ailearn_editor::DEFAULT_LANGUAGE;
use indexmap::IndexSet;
use tracing::{debug, warn};

// ============================================================================
// Tickets
// ============================================================================

/// Token identifying one backend request.
///
/// A completion is applied only if its ticket is still the latest one issued
/// for its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    /// Wraps a raw ticket number.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw ticket number.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Latest ticket per page region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionTickets {
    /// Course list and module list.
    pub sidebar: Option<Ticket>,
    /// Lesson content.
    pub lesson: Option<Ticket>,
    /// Quiz pane.
    pub quiz: Option<Ticket>,
    /// Mini-game pane.
    pub game: Option<Ticket>,
}

fn is_current(latest: Option<Ticket>, ticket: Ticket, region: &'static str) -> bool {
    let current = latest == Some(ticket);
    if !current {
        debug!(
            region,
            ticket = ticket.id(),
            latest = latest.map(Ticket::id),
            "Discarding stale response"
        );
    }
    current
}

// ============================================================================
// Regions
// ============================================================================

/// Lesson tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    /// Lesson explanation.
    #[default]
    Learn,
    /// Practice challenge and editor.
    Practice,
    /// Multiple-choice quiz.
    Quiz,
    /// Mini-game.
    Game,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Self; 4] = [Self::Learn, Self::Practice, Self::Quiz, Self::Game];

    /// Lowercase tab name as used in the page markup.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Learn => "learn",
            Self::Practice => "practice",
            Self::Quiz => "quiz",
            Self::Game => "game",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown tab '{s}': expected learn, practice, quiz or game"))
    }
}

/// Sidebar contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Sidebar {
    /// First course list is being fetched.
    #[default]
    Loading,
    /// Course list.
    Courses(Vec<Course>),
    /// Course list could not be fetched.
    Failed,
    /// Modules and lessons of one course.
    Modules(Arc<CourseDetail>),
}

/// Lesson content pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LessonPane {
    /// No lesson opened yet.
    #[default]
    Welcome,
    /// Lesson is being generated.
    Loading,
    /// `current_lesson` is shown.
    Ready,
    /// Lesson could not be fetched.
    Failed,
}

/// Quiz questions with the learner's selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizView {
    questions: Vec<Question>,
    selected: Vec<IndexSet<String>>,
}

impl QuizView {
    /// Fresh view with nothing selected.
    #[must_use]
    pub fn new(quiz: Quiz) -> Self {
        let selected = vec![IndexSet::new(); quiz.questions.len()];
        Self {
            questions: quiz.questions,
            selected,
        }
    }

    /// Questions in order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns `true` when the quiz has no questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns `true` if option `key` of question `index` has been chosen.
    #[must_use]
    pub fn is_selected(&self, index: usize, key: &str) -> bool {
        self.selected
            .get(index)
            .is_some_and(|keys| keys.contains(key))
    }

    /// Returns `true` once any option of question `index` has been chosen.
    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.selected.get(index).is_some_and(|keys| !keys.is_empty())
    }

    fn select(&mut self, index: usize, key: &str) -> bool {
        let known = self
            .questions
            .get(index)
            .is_some_and(|q| q.options.contains_key(key));
        if known {
            if let Some(keys) = self.selected.get_mut(index) {
                keys.insert(key.to_string());
            }
        }
        known
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Everything that can change the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Course list fetch started. The sidebar keeps its content until it arrives.
    CoursesRequested(Ticket),
    /// Course list arrived.
    CoursesLoaded {
        /// Request ticket.
        ticket: Ticket,
        /// Courses in backend order.
        courses: Vec<Course>,
    },
    /// Course list fetch failed.
    CoursesFailed(Ticket),
    /// Module list fetch started. The sidebar keeps its content until it arrives.
    CourseRequested(Ticket),
    /// Module list arrived.
    CourseLoaded {
        /// Request ticket.
        ticket: Ticket,
        /// Course with its modules.
        course: CourseDetail,
    },
    /// Lesson fetch started.
    LessonRequested(Ticket),
    /// Lesson arrived.
    LessonLoaded {
        /// Request ticket.
        ticket: Ticket,
        /// Lesson payload.
        lesson: Box<Lesson>,
    },
    /// Lesson fetch failed.
    LessonFailed(Ticket),
    /// Learner switched tabs.
    TabSelected(Tab),
    /// Quiz fetch started.
    QuizRequested(Ticket),
    /// Quiz arrived.
    QuizLoaded {
        /// Request ticket.
        ticket: Ticket,
        /// Quiz questions.
        quiz: Quiz,
    },
    /// Game fetch started.
    GameRequested(Ticket),
    /// Game arrived.
    GameLoaded {
        /// Request ticket.
        ticket: Ticket,
        /// Mini-game.
        game: Game,
    },
    /// Learner picked an answer.
    QuizOptionSelected {
        /// Zero-based question index.
        question: usize,
        /// Option key.
        key: String,
    },
    /// Learner picked an editor language.
    LanguageSelected(String),
    /// New text for the output console.
    CodeOutput(String),
    /// Learner marked the current lesson as done.
    LessonCompleted,
}

// ============================================================================
// ViewState
// ============================================================================

/// Everything the page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Sidebar contents.
    pub sidebar: Sidebar,
    /// Course whose modules were last opened.
    pub current_course: Option<Arc<CourseDetail>>,
    /// Lesson last loaded successfully.
    pub current_lesson: Option<Arc<Lesson>>,
    /// Lesson content pane.
    pub lesson_pane: LessonPane,
    /// Active tab.
    pub tab: Tab,
    /// Quiz pane, `None` until a quiz arrives.
    pub quiz: Option<QuizView>,
    /// Game pane, `None` until a game arrives.
    pub game: Option<Game>,
    /// Practice challenge text.
    pub challenge_description: Option<String>,
    /// Language chosen in the language selector.
    pub language: String,
    /// Output console text.
    pub code_output: String,
    /// Whether the current lesson was marked complete.
    pub lesson_complete: bool,
    /// Latest request per region.
    pub tickets: RegionTickets,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl ViewState {
    /// Initial state: courses loading, welcome pane, learn tab.
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            sidebar: Sidebar::Loading,
            current_course: None,
            current_lesson: None,
            lesson_pane: LessonPane::Welcome,
            tab: Tab::Learn,
            quiz: None,
            game: None,
            challenge_description: None,
            language: language.into(),
            code_output: String::new(),
            lesson_complete: false,
            tickets: RegionTickets::default(),
        }
    }

    /// Identifier of the current lesson.
    #[must_use]
    pub fn lesson_id(&self) -> Option<&str> {
        self.current_lesson.as_deref().map(Lesson::id)
    }

    /// Applies one action and returns the next state.
    #[must_use]
    pub fn apply(mut self, action: Action) -> Self {
        match action {
            Action::CoursesRequested(ticket) | Action::CourseRequested(ticket) => {
                self.tickets.sidebar = Some(ticket);
            }
            Action::CoursesLoaded { ticket, courses } => {
                if is_current(self.tickets.sidebar, ticket, "sidebar") {
                    self.sidebar = Sidebar::Courses(courses);
                }
            }
            Action::CoursesFailed(ticket) => {
                if is_current(self.tickets.sidebar, ticket, "sidebar") {
                    self.sidebar = Sidebar::Failed;
                }
            }
            Action::CourseLoaded { ticket, course } => {
                if is_current(self.tickets.sidebar, ticket, "sidebar") {
                    let course = Arc::new(course);
                    self.sidebar = Sidebar::Modules(Arc::clone(&course));
                    self.current_course = Some(course);
                }
            }
            Action::LessonRequested(ticket) => {
                self.tickets.lesson = Some(ticket);
                self.lesson_pane = LessonPane::Loading;
            }
            Action::LessonLoaded { ticket, lesson } => {
                if is_current(self.tickets.lesson, ticket, "lesson") {
                    if let Some(challenge) = &lesson.content.practice_challenge {
                        self.challenge_description = Some(challenge.description.clone());
                    }
                    self.current_lesson = Some(Arc::from(lesson));
                    self.lesson_pane = LessonPane::Ready;
                    self.tab = Tab::Learn;
                }
            }
            Action::LessonFailed(ticket) => {
                if is_current(self.tickets.lesson, ticket, "lesson") {
                    self.lesson_pane = LessonPane::Failed;
                }
            }
            Action::TabSelected(tab) => self.tab = tab,
            Action::QuizRequested(ticket) => self.tickets.quiz = Some(ticket),
            Action::QuizLoaded { ticket, quiz } => {
                if is_current(self.tickets.quiz, ticket, "quiz") {
                    self.quiz = Some(QuizView::new(quiz));
                }
            }
            Action::GameRequested(ticket) => self.tickets.game = Some(ticket),
            Action::GameLoaded { ticket, game } => {
                if is_current(self.tickets.game, ticket, "game") {
                    self.game = Some(game);
                }
            }
            Action::QuizOptionSelected { question, key } => {
                let selected = self
                    .quiz
                    .as_mut()
                    .is_some_and(|quiz| quiz.select(question, &key));
                if !selected {
                    warn!(question, key = %key, "Ignoring selection of unknown quiz option");
                }
            }
            Action::LanguageSelected(language) => self.language = language,
            Action::CodeOutput(output) => self.code_output = output,
            Action::LessonCompleted => {
                if self.current_lesson.is_some() {
                    self.lesson_complete = true;
                } else {
                    warn!("Ignoring completion without a current lesson");
                }
            }
        }
        self
    }
}
