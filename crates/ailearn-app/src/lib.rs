//! AI Learn client application.
//!
//! Ties the backend client and the editor adapter together:
//!
//! - [`config`]: file-backed settings (`ailearn.json`)
//! - [`state`]: immutable view state advanced by [`state::Action`]s
//! - [`render`]: pure HTML rendering of the view state into page regions
//! - [`controller`]: the [`App`] that handles user events

pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod state;

pub use config::Config;
pub use controller::{App, LESSON_COMPLETE_MESSAGE, RUNNING_CODE_MESSAGE};
pub use error::{AppError, Result};
pub use render::{render, Page};
pub use state::{Action, Tab, Ticket, ViewState};
