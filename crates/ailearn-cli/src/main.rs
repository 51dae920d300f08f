//! AI Learn CLI
//!
//! Drives the AI Learn client headlessly against a running backend and prints
//! the rendered page regions.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ailearn_api::{ApiClient, LessonApi};
use ailearn_app::state::{LessonPane, Sidebar};
use ailearn_app::{App, Config, Page, Tab};
use ailearn_editor::{HeadlessRuntime, TextBuffer};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Backend used when neither the config file nor `--base-url` names one.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

type CliApp = App<ApiClient, TextBuffer>;

/// AI Learn - AI-assisted programming courses from the terminal
///
/// Browses courses, lessons, quizzes and mini-games served by the AI Learn
/// backend and prints them as the web client would render them.
#[derive(Parser, Debug)]
#[command(name = "ailearn")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (default: ailearn.json in current directory)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Backend base URL (overrides apiBaseUrl from the config file)
    #[arg(short, long, value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available courses
    Courses,

    /// Show the modules and lessons of a course
    Course {
        /// Course identifier
        id: String,
    },

    /// Show a lesson
    Lesson {
        /// Lesson identifier
        id: String,

        /// Ask the backend to regenerate the lesson content
        #[arg(long)]
        regenerate: bool,

        /// Tab to show (learn, practice, quiz, game)
        #[arg(short, long, default_value = "learn")]
        tab: Tab,

        /// Quiz answer to select, as QUESTION:KEY with 1-based question numbers
        #[arg(short, long, value_name = "Q:KEY", value_parser = parse_selection)]
        select: Vec<(usize, String)>,
    },

    /// Put code in the editor and press "run"
    Run {
        /// Editor language
        #[arg(short, long)]
        language: Option<String>,

        /// Source file to load into the editor (default: the language template)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Execute a source file on the backend
    Execute {
        /// Source language
        #[arg(short, long)]
        language: Option<String>,

        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show user progress as stored by the backend
    Progress,

    /// Check backend health
    Check,
}

/// Parses `Q:KEY` into a zero-based question index and an option key.
fn parse_selection(s: &str) -> Result<(usize, String), String> {
    let (question, key) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid selection '{s}': expected QUESTION:KEY"))?;
    let number: usize = question
        .trim()
        .parse()
        .map_err(|_| format!("invalid question number '{question}'"))?;
    if number == 0 {
        return Err("question numbers start at 1".to_string());
    }
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid selection '{s}': missing option key"));
    }
    Ok((number - 1, key.to_string()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Rendered output goes to stdout, logs to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(config = ?args.config, base_url = ?args.base_url, "Starting ailearn");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        config.api_base_url = base_url;
    }
    // Re-validate after overrides
    config.validate()?;

    if config.api_base_url.is_empty() {
        DEFAULT_BASE_URL.clone_into(&mut config.api_base_url);
    }
    tracing::info!(base_url = %config.api_base_url, "Using backend");

    let api = ApiClient::new(config.api_base_url.clone());
    let mut app: CliApp = App::new(api, config);

    match args.command {
        Command::Courses => {
            app.load_courses().await;
            print_region(&app.page().course_list);
            if app.state().sidebar == Sidebar::Failed {
                anyhow::bail!("Could not load courses from {}", app.config().api_base_url);
            }
        }
        Command::Course { id } => {
            app.open_course(&id).await;
            if !matches!(app.state().sidebar, Sidebar::Modules(_)) {
                anyhow::bail!(
                    "Could not load course '{id}'\n\nSuggestion: Run `ailearn courses` to list course identifiers"
                );
            }
            print_region(&app.page().course_list);
        }
        Command::Lesson {
            id,
            regenerate,
            tab,
            select,
        } => show_lesson(&mut app, &id, regenerate, tab, &select).await?,
        Command::Run { language, file } => run_code(&mut app, language, file.as_deref()).await?,
        Command::Execute { language, file } => {
            let code = read_source(&file)?;
            let language = language.unwrap_or_else(|| app.config().default_language.clone());
            let result = app.api().execute_code(&code, &language).await?;
            print_json(&result)?;
        }
        Command::Progress => {
            let progress = app.api().user_progress().await?;
            print_json(&progress)?;
        }
        Command::Check => {
            let health = app.api().health().await?;
            print_json(&health)?;
        }
    }

    Ok(())
}

async fn show_lesson(
    app: &mut CliApp,
    id: &str,
    regenerate: bool,
    tab: Tab,
    selections: &[(usize, String)],
) -> anyhow::Result<()> {
    app.start_editor(HeadlessRuntime::new())?.await?;
    app.load_lesson(id, regenerate).await;
    if app.state().lesson_pane != LessonPane::Ready {
        print_region(&app.page().lesson_content);
        anyhow::bail!("Could not load lesson '{id}'");
    }

    app.switch_tab(tab).await;
    for (question, key) in selections {
        app.select_quiz_option(*question, key);
    }

    let page = app.page();
    print_lesson_header(&page);
    print_region(page.tab_content(tab));
    if tab == Tab::Practice {
        println!();
        println!("{}", app.editor().code().await);
    }
    Ok(())
}

async fn run_code(
    app: &mut CliApp,
    language: Option<String>,
    file: Option<&Path>,
) -> anyhow::Result<()> {
    app.start_editor(HeadlessRuntime::new())?.await?;
    if let Some(language) = language {
        app.change_language(&language).await;
    }
    if let Some(file) = file {
        let code = read_source(file)?;
        app.editor().set_code(&code).await;
    }

    app.run_code().await;
    println!("{}", app.page().code_output);
    Ok(())
}

/// Loads configuration from the specified path or default location.
fn load_config(config_path: Option<&str>) -> anyhow::Result<Config> {
    match config_path {
        Some(path_str) => {
            let path = Path::new(path_str);
            if !path.exists() {
                anyhow::bail!(
                    "Config file not found: '{}'\n\nSuggestion: Check the path or remove the --config flag to use defaults",
                    path.display()
                );
            }
            Ok(Config::load_from_file(path)?)
        }
        None => Ok(Config::load()?),
    }
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        anyhow::anyhow!("Failed to read source file: {e}\n\nPath: {}", path.display())
    })
}

fn print_lesson_header(page: &Page) {
    println!("{}", page.lesson_title);
    println!("Difficulty: {}", page.difficulty_badge);
    if !page.keywords.is_empty() {
        println!("Keywords: {}", page.keywords);
    }
    println!();
}

fn print_region(html: &str) {
    println!("{}", html.trim_end());
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
