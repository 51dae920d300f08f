//! Configuration for the AI Learn client.
//!
//! Settings are read from an optional `ailearn.json` (camelCase keys). Every
//! field has a default, so a missing file or an empty object is a valid
//! configuration.

use std::path::Path;

use ailearn_api::DEFAULT_QUIZ_QUESTIONS;
use ailearn_editor::{CodeTemplates, EditorOptions, Theme, DEFAULT_LANGUAGE};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// The default config file name.
const CONFIG_FILE_NAME: &str = "ailearn.json";

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

const fn default_quiz_questions() -> u32 {
    DEFAULT_QUIZ_QUESTIONS
}

/// Main configuration for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Prefix prepended to every endpoint path. Empty means same origin.
    #[serde(default)]
    pub api_base_url: String,

    /// Language selected in the editor at startup.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Editor colour theme.
    #[serde(default)]
    pub editor_theme: Theme,

    /// Number of questions requested per quiz.
    #[serde(default = "default_quiz_questions")]
    pub quiz_questions: u32,

    /// Extra or replacement starter templates, keyed by language.
    #[serde(default)]
    pub code_templates: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            default_language: default_language(),
            editor_theme: Theme::default(),
            quiz_questions: default_quiz_questions(),
            code_templates: IndexMap::new(),
        }
    }
}

impl Config {
    /// Loads configuration from the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `ailearn.json` exists but is invalid.
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            AppError::config_parse(
                "<current directory>",
                format!("cannot determine current directory: {e}"),
            )
        })?;
        Self::load_from_dir(&current_dir)
    }

    /// Loads `ailearn.json` from a specific directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load_from_file(&dir.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigParseError` for unreadable files or invalid
    /// JSON, and `AppError::ConfigValidationError` for invalid values.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(e) => {
                return Err(AppError::config_parse(
                    path,
                    format!("failed to read file: {e}"),
                ));
            }
        };

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| AppError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// - `default_language` must not be empty
    /// - `quiz_questions` must be greater than 0
    /// - `api_base_url` must be empty or an `http(s)://` URL without a trailing slash
    pub fn validate(&self) -> Result<()> {
        if self.default_language.trim().is_empty() {
            return Err(AppError::config_validation(
                "defaultLanguage must not be empty",
                "Set defaultLanguage to a language such as \"python\" in your ailearn.json",
            ));
        }

        if self.quiz_questions == 0 {
            return Err(AppError::config_validation(
                "quizQuestions must be greater than 0",
                "Set quizQuestions to at least 1 in your ailearn.json",
            ));
        }

        let base = &self.api_base_url;
        if !base.is_empty() {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(AppError::config_validation(
                    format!("apiBaseUrl '{base}' is not an http(s) URL"),
                    "Use a URL such as \"http://localhost:8000\" in your ailearn.json, or leave apiBaseUrl empty",
                ));
            }
            if base.ends_with('/') {
                return Err(AppError::config_validation(
                    format!("apiBaseUrl '{base}' must not end with '/'"),
                    "Remove the trailing slash from apiBaseUrl in your ailearn.json",
                ));
            }
        }

        Ok(())
    }

    /// Starter templates with the configured overrides applied.
    #[must_use]
    pub fn templates(&self) -> CodeTemplates {
        CodeTemplates::with_overrides(
            self.code_templates
                .iter()
                .map(|(lang, text)| (lang.clone(), text.clone())),
        )
    }

    /// Construction options for the editor widget.
    #[must_use]
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions::new(
            &self.templates(),
            self.default_language.clone(),
            self.editor_theme,
        )
    }
}
