//! AI Learn Editor Adapter
//!
//! Owns the single code-editor widget of the application. The concrete
//! widget (a browser editor, or the headless [`TextBuffer`]) sits behind the
//! [`EditorWidget`] trait and is constructed asynchronously by an
//! [`EditorRuntime`].

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod adapter;
pub mod buffer;
pub mod templates;

pub use adapter::Editor;
pub use buffer::{HeadlessRuntime, TextBuffer};
pub use templates::{CodeTemplates, DEFAULT_LANGUAGE};

/// Location of the pinned browser editor runtime.
pub const EDITOR_LOADER_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/monaco-editor/0.45.0/min/vs";

/// DOM id of the element that hosts the editor.
pub const EDITOR_CONTAINER_ID: &str = "codeEditor";

/// Errors that can occur while managing the editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// `initialize` was called on an editor that already has (or is loading) a widget.
    #[error("editor is already initialized")]
    AlreadyInitialized,

    /// The runtime failed to construct the widget.
    #[error("failed to load editor runtime: {0}")]
    LoadFailed(String),
}

/// Colour theme of the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    /// Dark theme (default).
    #[default]
    Dark,
    /// Light theme.
    Light,
}

impl Theme {
    /// Returns the theme identifier understood by the editor widget.
    #[must_use]
    pub const fn widget_id(&self) -> &'static str {
        match self {
            Self::Dark => "vs-dark",
            Self::Light => "vs-light",
        }
    }

    fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
        }
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str_case_insensitive(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid editor theme '{s}': expected one of 'dark', 'light'"
            ))
        })
    }
}

impl Serialize for Theme {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Construction options handed to the editor runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct EditorOptions {
    /// DOM id of the hosting element.
    pub container: String,
    /// Initial text.
    pub value: String,
    /// Syntax-highlighting language.
    pub language: String,
    /// Colour theme.
    pub theme: Theme,
    /// Font size in pixels.
    pub font_size: u32,
    /// Whether line numbers are shown.
    pub line_numbers: bool,
    /// Whether the minimap is shown.
    pub minimap: bool,
    /// Whether long lines wrap.
    pub word_wrap: bool,
    /// Tab width in spaces.
    pub tab_size: u32,
    /// Whether the widget resizes with its container.
    pub automatic_layout: bool,
    /// Whether the view may scroll past the last line.
    pub scroll_beyond_last_line: bool,
}

impl EditorOptions {
    /// Options for an editor seeded with the template for `language`.
    #[must_use]
    pub fn new(templates: &CodeTemplates, language: impl Into<String>, theme: Theme) -> Self {
        let language = language.into();
        Self {
            container: EDITOR_CONTAINER_ID.to_string(),
            value: templates.get(&language).to_string(),
            language,
            theme,
            font_size: 14,
            line_numbers: true,
            minimap: false,
            word_wrap: true,
            tab_size: 4,
            automatic_layout: true,
            scroll_beyond_last_line: false,
        }
    }
}

/// A constructed code-editor widget.
pub trait EditorWidget: Send + 'static {
    /// Returns the full text.
    fn value(&self) -> String;

    /// Replaces the full text.
    fn set_value(&mut self, text: &str);

    /// Returns the syntax-highlighting language.
    fn language(&self) -> &str;

    /// Switches the syntax-highlighting language without touching the text.
    fn set_language(&mut self, language: &str);
}

/// Loads the widget runtime and constructs widgets.
pub trait EditorRuntime: Send + 'static {
    /// Widget type produced by this runtime.
    type Widget: EditorWidget;

    /// Loads the runtime (if needed) and constructs a widget with `options`.
    fn load(
        &self,
        options: EditorOptions,
    ) -> impl Future<Output = Result<Self::Widget, EditorError>> + Send;
}
