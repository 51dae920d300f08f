//! Headless editor widget.
//!
//! [`TextBuffer`] keeps the editor text and language in memory. It backs the
//! CLI and tests, where no browser editor exists.

use std::time::Duration;

use tracing::debug;

use crate::{EditorError, EditorOptions, EditorRuntime, EditorWidget};

/// In-memory editor widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    language: String,
    options: EditorOptions,
}

impl TextBuffer {
    /// Creates a buffer from construction options.
    #[must_use]
    pub fn new(options: EditorOptions) -> Self {
        Self {
            text: options.value.clone(),
            language: options.language.clone(),
            options,
        }
    }

    /// Options the buffer was constructed with.
    #[must_use]
    pub const fn options(&self) -> &EditorOptions {
        &self.options
    }
}

impl EditorWidget for TextBuffer {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn set_language(&mut self, language: &str) {
        language.clone_into(&mut self.language);
    }
}

/// Runtime that constructs [`TextBuffer`] widgets, optionally after a delay
/// standing in for the browser runtime download.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRuntime {
    load_delay: Option<Duration>,
}

impl HeadlessRuntime {
    /// Runtime that constructs widgets immediately.
    #[must_use]
    pub const fn new() -> Self {
        Self { load_delay: None }
    }

    /// Runtime that waits `delay` before constructing each widget.
    #[must_use]
    pub const fn with_load_delay(delay: Duration) -> Self {
        Self {
            load_delay: Some(delay),
        }
    }
}

impl EditorRuntime for HeadlessRuntime {
    type Widget = TextBuffer;

    async fn load(&self, options: EditorOptions) -> Result<TextBuffer, EditorError> {
        if let Some(delay) = self.load_delay {
            debug!(delay_ms = delay.as_millis(), "Simulating editor runtime load");
            tokio::time::sleep(delay).await;
        }
        Ok(TextBuffer::new(options))
    }
}
