//! Owned handle to the application's code editor.
//!
//! The widget is created once, asynchronously, and lives until the handle
//! and all its clones are dropped. Until construction finishes every
//! accessor behaves as if the editor were empty.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::{CodeTemplates, EditorError, EditorOptions, EditorRuntime, EditorWidget};

/// Cloneable handle to the single editor widget.
///
/// # Example
///
/// ```
/// use ailearn_editor::{CodeTemplates, Editor, EditorOptions, HeadlessRuntime, Theme};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let templates = CodeTemplates::default();
/// let options = EditorOptions::new(&templates, "python", Theme::Dark);
/// let editor = Editor::new(templates);
///
/// let loading = editor.initialize(HeadlessRuntime::new(), options, || {})?;
/// loading.await?;
/// assert!(editor.code().await.contains("Hello, World!"));
/// # Ok(())
/// # }
/// ```
pub struct Editor<W> {
    widget: Arc<Mutex<Option<W>>>,
    initialized: Arc<AtomicBool>,
    templates: Arc<CodeTemplates>,
}

impl<W> Clone for Editor<W> {
    fn clone(&self) -> Self {
        Self {
            widget: Arc::clone(&self.widget),
            initialized: Arc::clone(&self.initialized),
            templates: Arc::clone(&self.templates),
        }
    }
}

impl<W> std::fmt::Debug for Editor<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("initialized", &self.initialized.load(Ordering::SeqCst))
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}

impl<W: EditorWidget> Editor<W> {
    /// Creates a handle with no widget yet.
    #[must_use]
    pub fn new(templates: CodeTemplates) -> Self {
        Self {
            widget: Arc::new(Mutex::new(None)),
            initialized: Arc::new(AtomicBool::new(false)),
            templates: Arc::new(templates),
        }
    }

    /// Templates used for language switches.
    #[must_use]
    pub fn templates(&self) -> &CodeTemplates {
        &self.templates
    }

    /// Starts constructing the widget in the background.
    ///
    /// Returns as soon as the load is spawned. `on_ready` runs once the widget
    /// exists; a load failure is logged and leaves the editor empty. The
    /// returned handle completes when the load has finished either way.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::AlreadyInitialized`] on every call after the first.
    pub fn initialize<R, F>(
        &self,
        runtime: R,
        options: EditorOptions,
        on_ready: F,
    ) -> Result<JoinHandle<()>, EditorError>
    where
        R: EditorRuntime<Widget = W>,
        F: FnOnce() + Send + 'static,
    {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Err(EditorError::AlreadyInitialized);
        }

        info!(
            container = %options.container,
            language = %options.language,
            theme = %options.theme,
            "Initializing editor"
        );

        let slot = Arc::clone(&self.widget);
        Ok(tokio::spawn(async move {
            match runtime.load(options).await {
                Ok(widget) => {
                    *slot.lock().await = Some(widget);
                    info!("Editor initialized");
                    on_ready();
                }
                Err(e) => error!(error = %e, "Editor failed to initialize"),
            }
        }))
    }

    /// Returns `true` once the widget has been constructed.
    pub async fn is_ready(&self) -> bool {
        self.widget.lock().await.is_some()
    }

    /// Current text, or `""` before the widget exists.
    pub async fn code(&self) -> String {
        self.widget
            .lock()
            .await
            .as_ref()
            .map(EditorWidget::value)
            .unwrap_or_default()
    }

    /// Replaces the text. Ignored before the widget exists.
    pub async fn set_code(&self, code: &str) {
        if let Some(widget) = self.widget.lock().await.as_mut() {
            widget.set_value(code);
        }
    }

    /// Current syntax language, if the widget exists.
    pub async fn language(&self) -> Option<String> {
        self.widget
            .lock()
            .await
            .as_ref()
            .map(|w| w.language().to_string())
    }

    /// Switches the syntax language.
    ///
    /// The text is replaced by the template for `language` only when the
    /// learner has not changed it (blank, or equal to any template). Returns
    /// whether the text was replaced; always `false` before the widget exists.
    pub async fn change_language(&self, language: &str) -> bool {
        let mut guard = self.widget.lock().await;
        let Some(widget) = guard.as_mut() else {
            debug!(language, "Editor not ready, ignoring language change");
            return false;
        };

        let replace = self.templates.is_unmodified(&widget.value());
        if replace {
            widget.set_value(self.templates.get(language));
        }
        widget.set_language(language);

        debug!(language, replaced = replace, "Editor language changed");
        replace
    }
}
